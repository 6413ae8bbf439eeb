//! Generate middleware entry points for a small service
//!
//! Run with: `cargo run -p middleflow-sdk --example generate_pipeline`
//!
//! The example will:
//! - Lay out a throwaway service with JavaScript and TypeScript modules
//! - Build every function that declares middleware
//! - Print the generated entry points, then clean them up

use middleflow_sdk::{BuildConfig, MiddlewareBuilder};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CONFIG: &str = r#"
pre:
  - { then: lib/auth.check, catch: lib/errors.report }
pos:
  - lib/audit.log
runtime: nodejs20.x
"#;

const FUNCTIONS: &str = r#"
getUser:
  handler: src/users.get
createOrder:
  handler: src/orders.create
  middleware:
    pre: [src/orders.validate]
"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let service = tempfile::TempDir::new()?;
    for module in ["lib/auth.js", "lib/errors.js", "lib/audit.js", "src/users.js", "src/orders.ts"] {
        let path = service.path().join(module);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, "")?;
    }

    let mut config = BuildConfig::from_yaml(CONFIG)?;
    // Function-level pre/pos meet global lists here, so pick a policy.
    config.pre_pos_policy = middleflow_sdk::PrePosPolicy::Nest;

    let builder = MiddlewareBuilder::new(config.with_service_path(service.path()))
        .with_functions_yaml(FUNCTIONS)?;

    let artifacts = builder.build_all().await?;

    for artifact in &artifacts {
        println!(
            "=== {} -> {} ({}, {} steps) ===",
            artifact.function,
            artifact.file_name.display(),
            artifact.variant,
            artifact.step_count
        );
        println!("handler: {}\n", artifact.handler);
        println!("{}", artifact.source);
    }

    builder.clean().await;
    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "middleflow_sdk=info,middleflow_compiler=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
