/*!
Command layer.

  table.rs       static CommandSpec table (name -> endpoint -> template)
  template.rs    field templates, lookup tables, block rendering
  invocation.rs  chat line -> Invocation (positionals + options w/ defaults)
  dispatch.rs    Router: the one generic request/format routine, Reply
  format.rs      terminal styling for human output
  list.rs        `list` subcommand
  run.rs         `run` / `shell` subcommands

Conventions:
  - Each subcommand module exposes one public `execute_*` function
    returning `anyhow::Result<()>`.
  - Argument structs derive `clap::Args` and stay minimal.
  - Nothing here holds mutable state across invocations.
*/

pub mod dispatch;
pub mod format;
pub mod invocation;
pub mod list;
pub mod run;
pub mod table;
pub mod template;

pub use list::{ListArgs, execute_list};
pub use run::{RunArgs, ShellArgs, execute_run, execute_shell};
