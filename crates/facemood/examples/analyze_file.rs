//! Analyse a local image file and print the result.
//!
//! ```bash
//! FACEMOOD_ANALYZER_URL=http://127.0.0.1:5005 \
//!   cargo run -p facemood --example analyze_file -- happyandsad.jpg
//! ```

use tracing_subscriber::EnvFilter;

use facemood::config::FacemoodConfig;
use facemood::{AnalysisOutcome, EmotionPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let path = std::env::args().nth(1).ok_or_else(|| anyhow::anyhow!("usage: analyze_file <image>"))?;

  let mut config = FacemoodConfig::default();
  if let Ok(url) = std::env::var("FACEMOOD_ANALYZER_URL") {
    config.analyzer.base_url = url;
  }

  let pipeline = EmotionPipeline::from_config(&config)?;

  match pipeline.analyze_file(&path, None).await? {
    AnalysisOutcome::NoFace => println!("No face found in {path}"),
    AnalysisOutcome::MultipleFaces(n) => println!("More than one face in {path} ({n} found)"),
    AnalysisOutcome::SingleFace(records) => {
      println!("{}", serde_json::to_string_pretty(&records)?);
    }
  }

  Ok(())
}
