/*!
table.rs - the static command binding table.

Each `CommandSpec` ties a chat command name to:
  - its positional arguments and `-x` options (with defaults)
  - the tianapi endpoint it queries
  - where every query parameter comes from (`Source`), in request order
  - the field template used to render each record
  - an optional option whose value truncates the record list client-side

The table is built at compile time and never mutated. One generic routine
(`dispatch.rs`) consumes it.
*/

use crate::api::EndpointRequest;
use crate::cmd::invocation::Invocation;
use crate::cmd::template::{self, Template};

#[derive(Debug)]
pub struct ArgSpec {
    pub name: &'static str,
    pub required: bool,
}

#[derive(Debug)]
pub struct OptionSpec {
    /// Short flag, used as `-n 3`.
    pub flag: char,
    /// Long name, also usable as `--num 3`; key for `Source::Opt`.
    pub name: &'static str,
    pub help: &'static str,
    pub default: Option<&'static str>,
    /// Value must parse as a non-negative integer.
    pub numeric: bool,
}

/// Where a query parameter value comes from.
#[derive(Debug, Clone, Copy)]
pub enum Source {
    /// Positional argument by index; absent when not supplied.
    Arg(usize),
    /// Option value, or its default.
    Opt(&'static str),
    Literal(&'static str),
    /// Positional argument, falling back to the current calendar year.
    ArgOrCurrentYear(usize),
}

#[derive(Debug)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub example: &'static str,
    pub args: &'static [ArgSpec],
    pub options: &'static [OptionSpec],
    pub endpoint: &'static str,
    pub params: &'static [(&'static str, Source)],
    pub template: Template,
    /// Option holding the number of records to keep after the response.
    pub limit: Option<&'static str>,
}

impl CommandSpec {
    /// `地区新闻 <areaname> [word] [-p page]`
    pub fn usage(&self) -> String {
        let mut out = self.name.to_string();
        for a in self.args {
            if a.required {
                out.push_str(&format!(" <{}>", a.name));
            } else {
                out.push_str(&format!(" [{}]", a.name));
            }
        }
        for o in self.options {
            out.push_str(&format!(" [-{} {}]", o.flag, o.name));
        }
        out
    }

    pub fn option(&self, name: &str) -> Option<&'static OptionSpec> {
        self.options.iter().find(|o| o.name == name)
    }

    pub fn option_by_flag(&self, flag: &str) -> Option<&'static OptionSpec> {
        if let Some(long) = flag.strip_prefix("--") {
            return self.options.iter().find(|o| o.name == long);
        }
        let short = flag.strip_prefix('-')?;
        let mut chars = short.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        self.options.iter().find(|o| o.flag == c)
    }

    /// Resolve every parameter source against one invocation.
    pub fn request(&self, inv: &Invocation, current_year: i32) -> EndpointRequest {
        let params = self
            .params
            .iter()
            .map(|(name, source)| {
                let value = match *source {
                    Source::Arg(i) => inv.arg(i).map(str::to_string),
                    Source::Opt(opt) => inv.option(opt).map(str::to_string),
                    Source::Literal(v) => Some(v.to_string()),
                    Source::ArgOrCurrentYear(i) => Some(
                        inv.arg(i)
                            .map(str::to_string)
                            .unwrap_or_else(|| current_year.to_string()),
                    ),
                };
                (*name, value)
            })
            .collect();
        EndpointRequest::new(self.endpoint, params)
    }
}

const fn req(name: &'static str) -> ArgSpec {
    ArgSpec {
        name,
        required: true,
    }
}

const fn opt_arg(name: &'static str) -> ArgSpec {
    ArgSpec {
        name,
        required: false,
    }
}

const PAGE: OptionSpec = OptionSpec {
    flag: 'p',
    name: "page",
    help: "页数",
    default: Some("1"),
    numeric: true,
};

const NUM: OptionSpec = OptionSpec {
    flag: 'n',
    name: "num",
    help: "返回数量",
    default: Some("3"),
    numeric: true,
};

pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "地区",
        description: "查询地区信息",
        example: "地区 重庆",
        args: &[req("area")],
        options: &[],
        endpoint: "citylookup",
        params: &[("area", Source::Arg(0))],
        template: template::CITY_LOOKUP,
        limit: None,
    },
    CommandSpec {
        name: "术语",
        description: "查询计算机术语",
        example: "术语 IT",
        args: &[req("ct")],
        options: &[],
        endpoint: "pcterm",
        params: &[("word", Source::Arg(0))],
        template: template::PC_TERM,
        limit: None,
    },
    CommandSpec {
        name: "花语",
        description: "查询花语",
        example: "花语 百合花",
        args: &[req("flower")],
        options: &[],
        endpoint: "huayu",
        params: &[("word", Source::Arg(0))],
        template: template::FLOWER,
        limit: None,
    },
    CommandSpec {
        name: "节假日",
        description: "查询全年节假日, 默认今年",
        example: "节假日",
        args: &[opt_arg("year")],
        options: &[],
        endpoint: "jiejiari",
        params: &[
            ("date", Source::ArgOrCurrentYear(0)),
            ("type", Source::Literal("1")),
        ],
        template: template::HOLIDAY,
        limit: None,
    },
    CommandSpec {
        name: "地名",
        description: "查询古今地名",
        example: "地名 重庆",
        args: &[req("place")],
        options: &[],
        endpoint: "gjdm",
        params: &[("word", Source::Arg(0))],
        template: template::PLACE_NAME,
        limit: None,
    },
    CommandSpec {
        name: "电竞",
        description: "查询电竞新闻, 可以不填关键字",
        example: "电竞 csgo",
        args: &[opt_arg("word")],
        options: &[
            PAGE,
            NUM,
            OptionSpec {
                flag: 'r',
                name: "rand",
                help: "随机 1是 0否",
                default: Some("1"),
                numeric: true,
            },
        ],
        endpoint: "esports",
        params: &[
            ("page", Source::Opt("page")),
            ("num", Source::Opt("num")),
            ("rand", Source::Opt("rand")),
            ("word", Source::Arg(0)),
        ],
        template: template::ESPORTS,
        limit: None,
    },
    CommandSpec {
        name: "热搜",
        description: "全网热搜榜",
        example: "热搜 -n 5",
        args: &[],
        options: &[NUM],
        endpoint: "networkhot",
        params: &[],
        template: template::NETWORK_HOT,
        limit: Some("num"),
    },
    CommandSpec {
        name: "时间",
        description: "查询世界时间",
        example: "时间 东京",
        args: &[req("city")],
        options: &[],
        endpoint: "worldtime",
        params: &[("city", Source::Arg(0))],
        template: template::WORLD_TIME,
        limit: None,
    },
    CommandSpec {
        name: "v6",
        description: "检查域名是否支持 IPv6",
        example: "v6 example.com",
        args: &[req("domain")],
        options: &[],
        endpoint: "checkipv6",
        params: &[("domain", Source::Arg(0))],
        template: template::IPV6,
        limit: None,
    },
    CommandSpec {
        name: "微信热搜",
        description: "微信热搜话题",
        example: "微信热搜",
        args: &[],
        options: &[],
        endpoint: "wxhottopic",
        params: &[],
        template: template::WX_HOT_TOPIC,
        limit: None,
    },
    CommandSpec {
        name: "收货地址",
        description: "解析收货地址",
        example: "收货地址 张三 13800000000 重庆市渝中区解放碑",
        args: &[req("address")],
        options: &[],
        endpoint: "addressparse",
        params: &[("text", Source::Arg(0))],
        template: template::ADDRESS,
        limit: None,
    },
    CommandSpec {
        name: "空气质量",
        description: "查询空气质量",
        example: "空气质量 重庆",
        args: &[req("area")],
        options: &[],
        endpoint: "aqi",
        params: &[("area", Source::Arg(0))],
        template: template::AIR_QUALITY,
        limit: None,
    },
    CommandSpec {
        name: "宠物",
        description: "宠物百科",
        example: "宠物 -t 0",
        args: &[opt_arg("name")],
        options: &[
            OptionSpec {
                flag: 't',
                name: "type",
                help: "0猫科、1犬类、2爬行类、3小宠物类、4水族类",
                default: None,
                numeric: true,
            },
            OptionSpec {
                help: "翻页",
                ..PAGE
            },
            OptionSpec {
                help: "每页数量",
                ..NUM
            },
        ],
        endpoint: "pet",
        params: &[
            ("type", Source::Opt("type")),
            ("name", Source::Arg(0)),
            ("page", Source::Opt("page")),
            ("num", Source::Opt("num")),
        ],
        template: template::PET,
        limit: None,
    },
    CommandSpec {
        name: "地区新闻",
        description: "查询地区新闻",
        example: "地区新闻 重庆 火锅",
        args: &[req("areaname"), opt_arg("word")],
        options: &[OptionSpec {
            help: "翻页",
            ..PAGE
        }],
        endpoint: "areanews",
        params: &[
            ("areaname", Source::Arg(0)),
            ("word", Source::Arg(1)),
            ("page", Source::Opt("page")),
        ],
        template: template::AREA_NEWS,
        limit: None,
    },
];

/// Exact name match.
pub fn find(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        for (i, a) in COMMANDS.iter().enumerate() {
            for b in &COMMANDS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
        assert_eq!(COMMANDS.len(), 14);
    }

    #[test]
    fn sources_point_at_declared_args_and_options() {
        for cmd in COMMANDS {
            for (_, source) in cmd.params {
                match *source {
                    Source::Arg(i) | Source::ArgOrCurrentYear(i) => {
                        assert!(i < cmd.args.len(), "{}: arg {i} undeclared", cmd.name)
                    }
                    Source::Opt(o) => {
                        assert!(cmd.option(o).is_some(), "{}: option {o} undeclared", cmd.name)
                    }
                    Source::Literal(_) => {}
                }
            }
            if let Some(limit) = cmd.limit {
                assert!(cmd.option(limit).is_some());
            }
        }
    }

    #[test]
    fn required_args_precede_optional() {
        for cmd in COMMANDS {
            let first_optional = cmd.args.iter().position(|a| !a.required);
            if let Some(i) = first_optional {
                assert!(cmd.args[i..].iter().all(|a| !a.required), "{}", cmd.name);
            }
        }
    }

    #[test]
    fn usage_lines() {
        assert_eq!(find("地区").unwrap().usage(), "地区 <area>");
        assert_eq!(
            find("地区新闻").unwrap().usage(),
            "地区新闻 <areaname> [word] [-p page]"
        );
        assert_eq!(find("热搜").unwrap().usage(), "热搜 [-n num]");
    }

    #[test]
    fn flags_resolve_short_and_long() {
        let esports = find("电竞").unwrap();
        assert_eq!(esports.option_by_flag("-r").map(|o| o.name), Some("rand"));
        assert_eq!(esports.option_by_flag("--page").map(|o| o.name), Some("page"));
        assert!(esports.option_by_flag("-x").is_none());
        assert!(esports.option_by_flag("-np").is_none());
    }

    #[test]
    fn pet_options_keep_shared_defaults() {
        let pet = find("宠物").unwrap();
        assert_eq!(pet.option("page").and_then(|o| o.default), Some("1"));
        assert_eq!(pet.option("num").and_then(|o| o.default), Some("3"));
        assert_eq!(pet.option("type").and_then(|o| o.default), None);
    }
}
