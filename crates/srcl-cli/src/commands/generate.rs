use anyhow::Result;
use srcl_engine::Generator;

use crate::cli::ManifestArgs;

pub async fn handle(args: ManifestArgs) -> Result<()> {
    let request = super::load_request(args)?;
    let report = Generator::new().generate(&request).await?;

    if report.changed {
        println!(
            "✓ Wrote {} entries to {}",
            report.entries,
            report.output_file.display()
        );
    } else {
        println!(
            "✓ {} is up to date ({} entries)",
            report.output_file.display(),
            report.entries
        );
    }

    Ok(())
}
