use std::process::ExitCode;

use pipsync::main as pipsync_main;

fn main() -> ExitCode {
    pipsync_main(std::env::args_os())
}
