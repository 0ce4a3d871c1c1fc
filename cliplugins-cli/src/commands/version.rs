//! Version command

use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct VersionArgs {}

pub fn run(_args: VersionArgs) -> Result<()> {
    print!("{}", format_version());
    Ok(())
}

fn format_version() -> String {
    format!(
        "Client:\n Version:\t{}\n OS/Arch:\t{}/{}\n",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_version() {
        let out = format_version();
        assert!(out.starts_with("Client:\n"));
        assert!(out.contains(env!("CARGO_PKG_VERSION")));
        assert!(out.contains(std::env::consts::OS));
    }
}
