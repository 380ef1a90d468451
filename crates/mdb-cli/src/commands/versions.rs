//! List supported MariaDB versions.

use anyhow::Result;
use mdb_core::MariaDbVersion;
use mdb_ui::{Output, Style};

pub fn run(output: &Output) -> Result<i32> {
    output.header("Supported MariaDB versions");

    for version in MariaDbVersion::ALL {
        let mut detail = format!("windows installer {}", version.windows_release());
        if version == MariaDbVersion::DEFAULT {
            detail.push_str(&format!(" {}", Style::success("(default)")));
        }
        output.list_item(version.as_str(), &detail);
    }

    Ok(0)
}
