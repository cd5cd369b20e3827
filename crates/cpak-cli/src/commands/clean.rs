use miette::Result;

use cpak_ops::ops_clean::{self, CleanResult};
use cpak_util::progress::status;

pub fn exec() -> Result<()> {
    let root = super::project_root()?;
    match ops_clean::clean(&root)? {
        CleanResult::Cleaned => status("Cleaned", "removed build directory"),
        CleanResult::NothingToClean => status("Cleaned", "nothing to do"),
    }
    Ok(())
}
