//! Optional database creation.

use crate::installer::Context;
use mdb_core::{CommandLine, Result};
use std::path::Path;

/// `mysqladmin create <name>`, spawned without a shell so the name is
/// passed through verbatim.
pub fn create_database_command(bin_dir: &Path, name: &str) -> CommandLine {
    CommandLine::program(bin_dir.join("mysqladmin"), ["create", name])
}

/// Create `name` with the administrative client in `bin_dir`.
pub async fn create_database(ctx: &Context<'_>, bin_dir: &Path, name: &str) -> Result<()> {
    ctx.run_direct(create_database_command(bin_dir, name)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use mdb_core::ExecMode;

    #[tokio::test]
    async fn test_create_database_is_direct() {
        let fixture = Fixture::new();
        let bin = Path::new("/usr/bin");

        create_database(&fixture.ctx(), bin, "testdb").await.unwrap();

        let commands = fixture.executor.commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].mode, ExecMode::Direct);
        assert_eq!(commands[0].line.program_path(), Some(bin.join("mysqladmin").as_path()));
        assert_eq!(commands[0].line.args(), ["create", "testdb"]);
    }

    #[test]
    fn test_metacharacters_stay_in_one_argument() {
        let line = create_database_command(Path::new("/usr/bin"), "db; rm -rf /");
        assert_eq!(line.args(), ["create", "db; rm -rf /"]);
    }
}
