use lisprims_protocol::Protocol;

use crate::cmd::{read_input, DecodeArgs};
use crate::exit::{protocol_error, CliResult, SUCCESS};
use crate::output::{print_records, OutputFormat};

pub fn run(args: DecodeArgs, protocol: &Protocol, format: OutputFormat) -> CliResult<i32> {
    let raw = read_input(&args.input)?;
    let records = protocol
        .parse(&raw)
        .map_err(|err| protocol_error("decode failed", err))?;

    tracing::info!(
        variant = %protocol.variant(),
        bytes = raw.len(),
        records = records.len(),
        "decoded transmission"
    );
    print_records(&records, format);
    Ok(SUCCESS)
}
