use std::io::{self, Write};

use anyhow::Result;
use binlog_decode::{ColumnType, type_code_to_symbol};
use clap::Args;

#[derive(Args)]
pub struct TypesArgs {
    /// Look up a single type code instead of printing the whole table
    #[arg(long)]
    code: Option<u8>,
}

impl TypesArgs {
    pub fn run(self) -> Result<()> {
        let mut out = io::stdout().lock();
        match self.code {
            Some(code) => match type_code_to_symbol(code) {
                Some(ty) => writeln!(out, "{code}\t{ty}")?,
                None => writeln!(out, "{code}\t-")?,
            },
            None => {
                for ty in ColumnType::ALL {
                    writeln!(out, "{}\t{ty}", ty.code())?;
                }
            }
        }
        Ok(())
    }
}
