//! Main entry point for the ytdown CLI

use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ytdown::cli::args::VerbosityLevel;
use ytdown::cli::{Args, OutputFormatter};
use ytdown::{
    extract_video_id, DownloadOptions, FileSettings, HttpDownloadTrigger, Packager,
    ResolverConfig, StreamResolver, YtdError,
};

#[tokio::main]
async fn main() {
    if let Err(code) = run().await {
        std::process::exit(code);
    }
}

async fn run() -> Result<(), i32> {
    init_logging();

    let args = Args::parse();
    let formatter = OutputFormatter::new(args.verbosity_level());

    let resolver = StreamResolver::with_config(ResolverConfig {
        timeout: args.timeout_duration(),
        cache_ttl: args.cache_ttl_duration(),
        allow_merge: args.allow_merge,
    })
    .with_settings(FileSettings::from_default_location());

    let result = dispatch(&args, &formatter, resolver).await;

    match result {
        Ok(()) => Ok(()),
        Err(error) => {
            formatter.print_failure_trail(&error.to_string());
            Err(1)
        }
    }
}

async fn dispatch(
    args: &Args,
    formatter: &OutputFormatter,
    resolver: StreamResolver,
) -> Result<(), YtdError> {
    if args.check_provider {
        let id = extract_video_id(&args.video).ok_or(YtdError::InvalidReference)?;
        let template = args.provider.as_deref().unwrap_or_default();
        let check = resolver.check_provider(&id, template).await?;
        formatter.success(&format!(
            "Provider {} works, best quality {}",
            check.provider, check.quality
        ));
        return Ok(());
    }

    if args.print_url {
        let id = extract_video_id(&args.video).ok_or(YtdError::InvalidReference)?;
        let resolved = resolver
            .fetch_best_stream(&id, args.provider.as_deref())
            .await?;
        println!("{}", resolved.download_url);
        if let Some(audio_url) = &resolved.merge_audio_url {
            println!("{}", audio_url);
        }
        return Ok(());
    }

    if args.list {
        let id = extract_video_id(&args.video).ok_or(YtdError::InvalidReference)?;
        let listing = resolver.list_streams(&id, args.provider.as_deref()).await?;
        formatter.print_stream_listing(&listing);
        return Ok(());
    }

    let show_progress =
        !args.no_progress && args.verbosity_level() != VerbosityLevel::Quiet;
    let trigger = HttpDownloadTrigger::new(&args.output).with_progress(show_progress);
    let packager = Packager::new(resolver, Arc::new(trigger));

    info!(video = %args.video, "starting download request");
    let outcome = packager
        .handle_download_request(
            &args.video,
            &DownloadOptions {
                prompt_for_location: !args.overwrite,
                override_template: args.provider.clone(),
            },
        )
        .await?;

    formatter.print_download_outcome(&outcome);
    Ok(())
}

/// Initialize the tracing subscriber from RUST_LOG (errors only by default,
/// so normal CLI output stays clean)
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
