use anyhow::Result;
use srcl_engine::{CheckReport, Generator};

use crate::cli::ManifestArgs;

pub async fn handle(args: ManifestArgs) -> Result<()> {
    let request = super::load_request(args)?;
    let output = request.output_file.display().to_string();

    match Generator::new().check(&request).await? {
        CheckReport::UpToDate { entries } => {
            println!("✓ {} is up to date ({} entries)", output, entries);
            Ok(())
        }
        CheckReport::Missing => anyhow::bail!("{} does not exist", output),
        CheckReport::Stale {
            added,
            removed,
            changed,
        } => {
            println!("{} is stale:", output);
            for name in &added {
                println!("  + {}", name);
            }
            for name in &removed {
                println!("  - {}", name);
            }
            for name in &changed {
                println!("  ~ {}", name);
            }
            anyhow::bail!("{} must be regenerated", output)
        }
    }
}
