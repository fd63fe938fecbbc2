mod compute;
mod decode;
mod fix;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Fix(args) => fix::run(args, ctx),
        Command::Compute(args) => compute::run(args, ctx),
        Command::Decode(args) => decode::run(args, ctx),
    }
}
