/*!
template.rs - per-command field templates.

A template is a fixed, ordered list of `Field`s. Rendering a record walks the
list and emits one `label : value` line per field, so the output order never
depends on the order of keys in the JSON payload.

Code-valued fields (city level, ipv6 flag, pet category) go through a
`LookupTable` with an explicit default label; unknown codes never fail.
*/

use serde_json::Value;

use crate::api::Record;

/// Integer code -> label, with a label for everything else.
#[derive(Debug)]
pub struct LookupTable {
    pub entries: &'static [(i64, &'static str)],
    pub default: &'static str,
}

impl LookupTable {
    /// Numbers and numeric strings are both accepted as codes.
    pub fn label(&self, value: Option<&Value>) -> &'static str {
        let code = match value {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        code.and_then(|c| {
            self.entries
                .iter()
                .find(|(k, _)| *k == c)
                .map(|(_, label)| *label)
        })
        .unwrap_or(self.default)
    }
}

#[derive(Debug)]
pub enum Render {
    Text,
    Lookup(&'static LookupTable),
}

#[derive(Debug)]
pub struct Field {
    pub label: &'static str,
    pub key: &'static str,
    pub render: Render,
}

const fn text(label: &'static str, key: &'static str) -> Field {
    Field {
        label,
        key,
        render: Render::Text,
    }
}

const fn lookup(label: &'static str, key: &'static str, table: &'static LookupTable) -> Field {
    Field {
        label,
        key,
        render: Render::Lookup(table),
    }
}

pub type Template = &'static [Field];

/* ---- Lookup tables ---- */

pub const AREA_LEVEL: LookupTable = LookupTable {
    entries: &[(1, "地市级")],
    default: "区县级",
};

pub const YES_NO: LookupTable = LookupTable {
    entries: &[(1, "是")],
    default: "否",
};

pub const PET_CATEGORY: LookupTable = LookupTable {
    entries: &[
        (0, "猫科"),
        (1, "犬类"),
        (2, "爬行类"),
        (3, "小宠物类"),
        (4, "水族类"),
    ],
    default: "未知",
};

/* ---- Templates ---- */

pub const CITY_LOOKUP: Template = &[
    text("名称", "areacn"),
    text("省份", "provincecn"),
    text("城市", "citycn"),
    lookup("级别", "areatype", &AREA_LEVEL),
    text("天气id", "areaid"),
    text("纬度", "latitude"),
    text("经度", "longitude"),
    text("行政代码", "adcode"),
];

pub const PC_TERM: Template = &[
    text("缩写", "abbr"),
    text("术语", "type"),
    text("说明", "notes"),
];

pub const FLOWER: Template = &[
    text("花名", "cnflower"),
    text("英文", "enflower"),
    text("花语", "flowerlang"),
    text("箴言", "flowerprov"),
];

pub const HOLIDAY: Template = &[
    text("名称", "name"),
    text("节日", "holiday"),
    text("提示", "tip"),
];

pub const PLACE_NAME: Template = &[text("地名", "area"), text("历史", "introduce")];

pub const ESPORTS: Template = &[
    text("标题", "title"),
    text("时间", "ctime"),
    text("描述", "description"),
    text("来源", "source"),
    text("地址", "url"),
];

pub const NETWORK_HOT: Template = &[
    text("标题", "title"),
    text("指数", "hotnum"),
    text("简介", "digest"),
];

pub const WORLD_TIME: Template = &[
    text("国家", "country"),
    text("城市", "city"),
    text("时区", "timeZone"),
    text("时间", "strtime"),
    text("星期", "week"),
    text("时间戳", "timestamp"),
];

pub const IPV6: Template = &[
    text("域名", "domain"),
    lookup("开启", "isipv6", &YES_NO),
    text("地址", "ipv6"),
];

pub const WX_HOT_TOPIC: Template = &[text("排序", "index"), text("话题", "word")];

pub const ADDRESS: Template = &[
    text("手机", "mobile"),
    text("姓名", "name"),
    text("省份", "province"),
    text("城市", "city"),
    text("地区", "district"),
    text("邮编", "postcode"),
    text("详细", "detail"),
];

pub const AIR_QUALITY: Template = &[
    text("地区", "area"),
    text("二氧化硫", "so2"),
    text("臭氧", "o3"),
    text("pm2.5", "pm2_5"),
    text("首要污染物", "primary_pollutant"),
    text("一氧化碳", "co"),
    text("污染数", "num"),
    text("二氧化氮", "no2"),
    text("空气质量指数类别", "quality"),
    text("空气质量指数", "aqi"),
    text("颗粒物", "pm10"),
    text("臭氧8小时", "o3_8h"),
    text("更新时间", "time"),
];

pub const PET: Template = &[
    lookup("类型", "pettype", &PET_CATEGORY),
    text("名称", "name"),
    text("性格", "characters"),
    text("祖籍", "nation"),
    text("易患病", "easyOfDisease"),
    text("寿命", "life"),
    text("价格", "price"),
    text("描述", "desc"),
    text("体态特征", "feature"),
    text("特点", "characterFeature"),
    text("照顾须知", "careKnowledge"),
    text("喂养注意", "feedPoints"),
    text("详细来源", "url"),
    text("封面图片", "coverURL"),
];

pub const AREA_NEWS: Template = &[
    text("标题", "title"),
    text("配图", "picUrl"),
    text("描述", "description"),
    text("来源", "source"),
    text("链接", "url"),
    text("时间", "ctime"),
];

/* ---- Rendering ---- */

/// Display form of a raw JSON value. Missing and null render empty.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Render one record as `label : value` lines joined by `\n`.
pub fn render_block(template: Template, record: &Record) -> String {
    template
        .iter()
        .map(|field| {
            let raw = record.get(field.key);
            let value = match field.render {
                Render::Text => display_value(raw),
                Render::Lookup(table) => table.label(raw).to_string(),
            };
            format!("{} : {}", field.label, value)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
