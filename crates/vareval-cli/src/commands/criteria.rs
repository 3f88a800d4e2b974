//! Criteria command implementation.

use crate::cli::CriteriaArgs;
use crate::error::Result;
use crate::output::Formatter;
use vareval_domain::CnvKind;

/// Execute the criteria command.
pub fn execute_criteria(args: CriteriaArgs, formatter: &Formatter) -> Result<()> {
    let kind: Option<CnvKind> = args.set.into();
    let output = match kind {
        None => formatter.format_acmg_catalog(args.deprecated)?,
        Some(kind) => formatter.format_cnv_catalog(kind)?,
    };
    println!("{}", output);
    Ok(())
}
