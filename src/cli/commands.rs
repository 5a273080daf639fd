//! CLI command handlers.

use std::sync::Arc;

use crate::config::QuillConfig;
use crate::dispatch::Dispatcher;
use crate::models::ProviderKind;
use crate::types::AnalysisRequest;

use super::{AnalyzeArgs, ModelsArgs, ServeArgs};

/// Handle `quill serve`.
pub async fn handle_serve(
    config: &QuillConfig,
    args: ServeArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let bind = args.bind.unwrap_or_else(|| config.bind_addr().to_string());
    let dispatcher = Arc::new(Dispatcher::from_config(config));
    for kind in ProviderKind::ALL {
        tracing::info!(
            provider = %kind,
            connected = dispatcher.is_provider_connected(kind),
            "Provider status"
        );
    }
    crate::server::run_server(dispatcher, &bind).await?;
    Ok(())
}

/// Handle `quill analyze <task> <text>`.
pub async fn handle_analyze(
    config: &QuillConfig,
    args: AnalyzeArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let dispatcher = Dispatcher::from_config(config);
    let mut request = AnalysisRequest::new(args.text, args.task);
    if let Some(model) = args.model {
        request = request.with_model(model);
    }
    let result = dispatcher.analyze(request).await;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Handle `quill models [--provider P]`.
pub fn handle_models(
    config: &QuillConfig,
    args: ModelsArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let dispatcher = Dispatcher::from_config(config);
    let wanted = |kind: ProviderKind| args.provider.map_or(true, |p| p == kind);

    for kind in ProviderKind::ALL.into_iter().filter(|k| wanted(*k)) {
        let status = if dispatcher.is_provider_connected(kind) {
            "connected"
        } else {
            "no credentials"
        };
        println!("{kind}: {status}");
    }
    println!();

    for model in dispatcher
        .models()
        .into_iter()
        .filter(|m| wanted(m.descriptor.provider))
    {
        let d = &model.descriptor;
        let marker = if d.model_id == dispatcher.default_model() {
            "*"
        } else {
            " "
        };
        let available = if model.available { "yes" } else { "no" };
        println!(
            "{marker} {:<20} {:<12} {:<40} available: {available}",
            d.model_id,
            d.provider.as_str(),
            d.remote_name
        );
    }
    Ok(())
}
