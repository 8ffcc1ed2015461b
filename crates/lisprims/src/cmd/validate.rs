use lisprims_protocol::Protocol;

use crate::cmd::encode::parse_records;
use crate::cmd::{read_input, ValidateArgs};
use crate::exit::{protocol_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_validation, OutputFormat};

pub fn run(args: ValidateArgs, protocol: &Protocol, format: OutputFormat) -> CliResult<i32> {
    let input = read_input(&args.input)?;
    let records = if args.records {
        parse_records(&input)?
    } else {
        protocol
            .parse(&input)
            .map_err(|err| protocol_error("decode failed", err))?
    };

    let result = protocol.validate(&records);
    tracing::info!(
        variant = %protocol.variant(),
        strict = protocol.config().strict,
        records = records.len(),
        errors = result.errors().len(),
        warnings = result.warnings().len(),
        "validated transmission"
    );
    print_validation(&result, records.len(), format);

    Ok(if result.is_valid() {
        SUCCESS
    } else {
        DATA_INVALID
    })
}
