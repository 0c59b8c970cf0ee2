/*!
`list.rs`

Implements the `list` subcommand: prints the static command table.

JSON Output Shape:
{
  "status": "ok",
  "count": 14,
  "commands": [
    {
      "name": "热搜",
      "usage": "热搜 [-n num]",
      "endpoint": "networkhot",
      "description": "全网热搜榜",
      "example": "热搜 -n 5",
      "options": [{"flag":"-n","name":"num","default":"3","help":"返回数量"}]
    }
  ]
}
*/

use anyhow::Result;
use clap::Args;
use serde_json::json;

use crate::cmd::format::{Role, StyleOptions, color, table};
use crate::cmd::table::{COMMANDS, CommandSpec};

/// CLI arguments for `tianxing list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

pub fn execute_list(args: ListArgs) -> Result<()> {
    if args.json {
        let items: Vec<_> = COMMANDS.iter().map(command_json).collect();
        println!(
            "{}",
            json!({
                "status": "ok",
                "count": items.len(),
                "commands": items,
            })
        );
        return Ok(());
    }

    let style = StyleOptions::detect();
    println!(
        "{}  {}",
        color(Role::Primary, format!("Commands ({})", COMMANDS.len()), &style),
        color(Role::Secondary, "source: tianapi.com", &style)
    );
    println!("{}", render_table(&style));
    Ok(())
}

fn render_table(style: &StyleOptions) -> String {
    let rows: Vec<Vec<String>> = COMMANDS
        .iter()
        .map(|c| {
            vec![
                c.usage(),
                c.endpoint.to_string(),
                c.description.to_string(),
                c.example.to_string(),
            ]
        })
        .collect();
    table(&["USAGE", "ENDPOINT", "DESCRIPTION", "EXAMPLE"], &rows, style)
}

fn command_json(c: &CommandSpec) -> serde_json::Value {
    let options: Vec<_> = c
        .options
        .iter()
        .map(|o| {
            json!({
                "flag": format!("-{}", o.flag),
                "name": o.name,
                "default": o.default,
                "help": o.help,
            })
        })
        .collect();
    json!({
        "name": c.name,
        "usage": c.usage(),
        "endpoint": c.endpoint,
        "description": c.description,
        "example": c.example,
        "options": options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::table::find;

    #[test]
    fn table_lists_every_command() {
        let out = render_table(&StyleOptions::plain(220));
        for c in COMMANDS {
            assert!(out.contains(c.endpoint), "missing {}", c.endpoint);
        }
        assert_eq!(out.lines().count(), COMMANDS.len() + 2);
    }

    #[test]
    fn json_entry_carries_option_defaults() {
        let v = command_json(find("电竞").unwrap());
        assert_eq!(v["endpoint"], "esports");
        assert_eq!(v["options"][0]["flag"], "-p");
        assert_eq!(v["options"][0]["default"], "1");
        assert_eq!(v["options"][2]["name"], "rand");
    }
}
