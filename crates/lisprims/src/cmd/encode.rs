use std::fs;

use lisprims_protocol::Protocol;
use lisprims_record::Record;

use crate::cmd::{read_input, EncodeArgs};
use crate::exit::{io_error, json_error, protocol_error, CliResult, SUCCESS};
use crate::output::print_raw;

pub fn run(args: EncodeArgs, protocol: &Protocol) -> CliResult<i32> {
    let input = read_input(&args.input)?;
    let records = parse_records(&input)?;
    let raw = protocol
        .serialize(&records)
        .map_err(|err| protocol_error("encode failed", err))?;

    tracing::info!(
        variant = %protocol.variant(),
        records = records.len(),
        bytes = raw.len(),
        "encoded transmission"
    );

    match &args.output {
        Some(path) => fs::write(path, &raw)
            .map_err(|err| io_error(&format!("failed writing {}", path.display()), err))?,
        None => print_raw(&raw),
    }
    Ok(SUCCESS)
}

/// Decode a JSON array of records, as printed by `decode --format json`.
pub fn parse_records(input: &[u8]) -> CliResult<Vec<Record>> {
    serde_json::from_slice(input).map_err(|err| json_error("invalid record JSON", err))
}
