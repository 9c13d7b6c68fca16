use cite_core::VerificationResult;

/// Handle `citecheck schema`: print the JSON schema of a verification result.
pub fn handle() -> anyhow::Result<()> {
    let schema = schemars::schema_for!(VerificationResult);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
