//! Print effective receiver parameters.

use super::common::ParamArgs;
use clap::Args;
use portador_config::PROFILE_NAMES;
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    params: ParamArgs,

    /// List built-in profiles instead
    #[arg(long, conflicts_with = "save")]
    list: bool,

    /// Also save the parameters to this TOML file
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    if args.list {
        for name in PROFILE_NAMES {
            println!("{name}");
        }
        return Ok(());
    }

    let params = args.params.resolve()?;
    print!("{}", params.to_toml()?);

    if let Some(path) = args.save {
        params.save(&path)?;
        eprintln!("Saved to {}", path.display());
    }

    Ok(())
}
