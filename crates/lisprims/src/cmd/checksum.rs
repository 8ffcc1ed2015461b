use lisprims_protocol::Protocol;

use crate::cmd::ChecksumArgs;
use crate::exit::{protocol_error, CliResult, SUCCESS};
use crate::output::{print_checksum, printable, OutputFormat};

pub fn run(args: ChecksumArgs, protocol: &Protocol, format: OutputFormat) -> CliResult<i32> {
    let checksum = protocol.checksum(&args.text);
    print_checksum(&args.text, &checksum, format);

    if let Some(frame_number) = args.wrap {
        let frame = protocol
            .wrap(&args.text, frame_number)
            .map_err(|err| protocol_error("wrap failed", err))?;
        println!("{}", printable(&String::from_utf8_lossy(&frame)));
    }
    Ok(SUCCESS)
}
