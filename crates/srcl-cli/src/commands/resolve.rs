use anyhow::Result;
use srcl_engine::Generator;

use crate::cli::ManifestArgs;

pub async fn handle(args: ManifestArgs) -> Result<()> {
    let request = super::load_request(args)?;
    let artifacts = Generator::new().resolve(&request).await?;

    if artifacts.is_empty() {
        println!("No artifacts resolved.");
        return Ok(());
    }

    println!("Artifacts ({}):", artifacts.len());
    for artifact in artifacts {
        println!("  {}", artifact.coordinate);
        println!("    from: {}", artifact.repository);
        println!("    file: {}", artifact.file.display());
    }

    Ok(())
}
