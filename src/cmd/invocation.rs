/*!
invocation.rs - turn a tokenized chat line into a bound `Invocation`.

Grammar (per command):
    NAME [POSITIONAL ...] [-f VALUE | --name VALUE ...]

  - options may appear anywhere after the command name
  - surplus positionals are joined with a space into the last declared
    argument (`收货地址 张三 138... 重庆市...` stays one address)
  - options not given fall back to their declared default
*/

use std::collections::HashMap;

use thiserror::Error;

use crate::cmd::table::{self, CommandSpec};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("请输入指令")]
    Empty,
    #[error("未知指令: {0}")]
    UnknownCommand(String),
    #[error("缺少参数 <{arg}>, 用法: {usage}")]
    MissingArgument { arg: &'static str, usage: String },
    #[error("未知选项 {flag}, 用法: {usage}")]
    UnknownOption { flag: String, usage: String },
    #[error("选项 {flag} 需要一个值")]
    MissingValue { flag: String },
    #[error("选项 {flag} 需要数字, 收到 '{value}'")]
    NotANumber { flag: String, value: String },
    #[error("多余的参数: {0}")]
    UnexpectedArgument(String),
}

/// A command bound to its arguments. Immutable once parsed.
#[derive(Debug)]
pub struct Invocation {
    pub spec: &'static CommandSpec,
    positionals: Vec<String>,
    options: HashMap<&'static str, String>,
}

impl Invocation {
    /// Split a raw chat line with shell rules, then parse it.
    pub fn parse_line(line: &str) -> Result<Self, UsageError> {
        let tokens = shell_words::split(line.trim())
            .unwrap_or_else(|_| line.split_whitespace().map(str::to_string).collect());
        Self::parse(&tokens)
    }

    pub fn parse(tokens: &[String]) -> Result<Self, UsageError> {
        let (name, rest) = tokens.split_first().ok_or(UsageError::Empty)?;
        let spec =
            table::find(name).ok_or_else(|| UsageError::UnknownCommand(name.to_string()))?;

        let mut positionals: Vec<String> = Vec::new();
        let mut options = HashMap::new();
        let mut iter = rest.iter();
        while let Some(tok) = iter.next() {
            if tok.starts_with('-') && tok.len() > 1 {
                let opt = spec
                    .option_by_flag(tok)
                    .ok_or_else(|| UsageError::UnknownOption {
                        flag: tok.clone(),
                        usage: spec.usage(),
                    })?;
                let value = iter.next().ok_or_else(|| UsageError::MissingValue {
                    flag: tok.clone(),
                })?;
                if opt.numeric && value.parse::<u32>().is_err() {
                    return Err(UsageError::NotANumber {
                        flag: tok.clone(),
                        value: value.clone(),
                    });
                }
                options.insert(opt.name, value.clone());
            } else {
                positionals.push(tok.clone());
            }
        }

        if positionals.len() > spec.args.len() {
            if spec.args.is_empty() {
                return Err(UsageError::UnexpectedArgument(positionals.join(" ")));
            }
            let tail = positionals.split_off(spec.args.len() - 1).join(" ");
            positionals.push(tail);
        }

        if let Some(missing) = spec.args.iter().skip(positionals.len()).find(|a| a.required) {
            return Err(UsageError::MissingArgument {
                arg: missing.name,
                usage: spec.usage(),
            });
        }

        Ok(Self {
            spec,
            positionals,
            options,
        })
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.positionals.get(index).map(String::as_str)
    }

    /// Supplied value, else the declared default.
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options
            .get(name)
            .map(String::as_str)
            .or_else(|| self.spec.option(name).and_then(|o| o.default))
    }

    /// Numeric option value, if present and parseable.
    pub fn option_usize(&self, name: &str) -> Option<usize> {
        self.option(name).and_then(|v| v.parse().ok())
    }
}
