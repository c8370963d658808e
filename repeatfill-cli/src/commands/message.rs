//! `repeatfill message` - send one control message to a target.
//!
//! The target is built from the config file, so `seq.config` only lasts for
//! this invocation unless `--save` writes the new spec back.

use clap::Args;
use repeatfill::config::ConfigKey;
use repeatfill::target::{ControlMessage, ControlReply};
use tracing::info;

use crate::error::CliError;
use crate::runner::CliRunner;

#[derive(Debug, Args)]
pub struct MessageArgs {
    /// Message and its arguments, e.g. `seq.config 0x00` or `seq.show`
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Persist a successful seq.config as pattern.spec in config.ini
    #[arg(long)]
    pub save: bool,
}

pub fn run(args: MessageArgs, debug: bool) -> Result<(), CliError> {
    let runner = CliRunner::with_debug(debug)?;
    runner.log_startup("message");

    let target = runner.create_target(None)?;
    let reply = target.message(&args.args)?;
    println!("{}", reply);

    if args.save {
        if let Some(spec) = configured_spec(&args.args, &reply) {
            let mut config = runner.config().clone();
            ConfigKey::PatternSpec
                .set(&mut config, &spec)
                .map_err(|e| CliError::Config(e.to_string()))?;
            config.save()?;
            info!("Saved pattern.spec = {}", spec);
            println!("Saved pattern.spec = {}", spec);
        }
    }

    Ok(())
}

/// Spec to persist after a successful `seq.config`.
fn configured_spec(args: &[String], reply: &ControlReply) -> Option<String> {
    match (ControlMessage::parse(args).ok()?, reply) {
        (ControlMessage::Configure { spec }, ControlReply::Configured { .. }) => Some(spec),
        _ => None,
    }
}
