use std::env;
use std::io;
use std::process;

fn main() -> anyhow::Result<()> {
    sshc::logging::init()?;

    let args: Vec<String> = env::args().skip(1).collect();
    let code = sshc::app::run(&args, &mut io::stdout(), &mut io::stderr());
    if code != sshc::error::EXIT_SUCCESS {
        process::exit(code);
    }
    Ok(())
}
