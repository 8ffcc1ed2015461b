use lisprims_frame::DeviceProfile;
use lisprims_protocol::ProtocolVariant;

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("lisprims {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: lisprims");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("LISPRIMS_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!("features: async={}, cli=true", cfg!(feature = "async"));
    println!("variants: {}", join_names(ProtocolVariant::ALL.map(|v| v.name())));
    println!("devices: {}", join_names(DeviceProfile::ALL.map(|d| d.name())));

    Ok(SUCCESS)
}

fn join_names<const N: usize>(names: [&str; N]) -> String {
    names.join(", ")
}
