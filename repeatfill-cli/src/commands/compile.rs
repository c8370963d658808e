//! `repeatfill compile` - show what a pattern spec expands to.

use clap::Args;
use repeatfill::pattern::CompiledPattern;

use crate::error::CliError;

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Pattern spec, e.g. 0xff, 0o17 or 0b10
    pub spec: String,
}

pub fn run(args: CompileArgs) -> Result<(), CliError> {
    println!("{}", describe(&args.spec)?);
    Ok(())
}

/// Multi-line description of a compiled spec.
fn describe(spec: &str) -> Result<String, CliError> {
    let pattern = CompiledPattern::compile(spec)?;
    let spec = pattern.spec();
    let unit = pattern.unit();

    Ok(format!(
        "Spec:   {}\nBase:   {} ({} digit{}, {} bits)\nUnit:   {} ({} byte{})",
        spec,
        spec.kind(),
        spec.digits().len(),
        if spec.digits().len() == 1 { "" } else { "s" },
        spec.bit_len(),
        unit,
        unit.len(),
        if unit.len() == 1 { "" } else { "s" },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_hex() {
        assert_eq!(
            describe("0xAB").unwrap(),
            "Spec:   0xAB\nBase:   hex (2 digits, 8 bits)\nUnit:   ba (1 byte)"
        );
    }

    #[test]
    fn test_describe_octal() {
        assert_eq!(
            describe("0o1").unwrap(),
            "Spec:   0o1\nBase:   octal (1 digit, 3 bits)\nUnit:   499224 (3 bytes)"
        );
    }

    #[test]
    fn test_describe_invalid() {
        assert!(matches!(describe("0xG1"), Err(CliError::Pattern(_))));
    }
}
