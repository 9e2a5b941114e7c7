//! Built-in grammar forms for fixed-form sentence practice

/// Grammar patterns offered in fixed-form mode
pub const GRAMMAR_FORMS: &[&str] = &[
    "S+不仅 + V1 + Ō, 也/还/而且 + V2 + Ó",
    "即使。。。也",
    "V + 光",
    "A 占 B + 数量",
    "V + 成 + Result",
    "好不容易 + 才 + Result",
    "比起来 B + (更 / 比较) + Adjective / Phrase",
    "跟 B 比起来 + (更 / 比较) + Adjective / Phrase",
];
