//! Bilingual chart text and locale-specific number grouping.
//!
//! The chart always shows Japanese and English side by side, so there is no
//! locale switch. Combination counts are grouped once per language.

/// Number display convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberLocale {
    /// ja-JP
    JaJp,
    /// en-US
    EnUs,
}

impl NumberLocale {
    pub fn tag(self) -> &'static str {
        match self {
            NumberLocale::JaJp => "ja-JP",
            NumberLocale::EnUs => "en-US",
        }
    }

    pub fn group_separator(self) -> char {
        match self {
            NumberLocale::JaJp | NumberLocale::EnUs => ',',
        }
    }

    /// Digits per group (both locales group by thousands)
    pub fn group_size(self) -> usize {
        3
    }
}

/// Format an integer with the locale's digit grouping, e.g. 40116600 -> "40,116,600"
pub fn format_grouped(value: u128, locale: NumberLocale) -> String {
    let digits = value.to_string();
    let group = locale.group_size();
    let separator = locale.group_separator();

    let mut out = String::with_capacity(digits.len() + digits.len() / group);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % group == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

pub const TITLE: &str = "歯牙欠損選択チャート（Dental Defect Selection Chart）";
pub const INSTRUCTIONS_JA: &str = "チェックを入れた歯は欠損歯としてカウントされます。";
pub const INSTRUCTIONS_EN: &str = "Check the boxes to mark teeth as missing.";
pub const RESET_LABEL: &str = "リセット (Reset)";

/// "欠損歯数: 3 本"
pub fn missing_count_line(missing: usize) -> String {
    format!("欠損歯数: {} 本", missing)
}

/// "3歯欠損の可能な組み合わせ数: 3,276 通り"
pub fn combinations_line(missing: usize, combinations: u128) -> String {
    format!(
        "{}歯欠損の可能な組み合わせ数: {} 通り",
        missing,
        format_grouped(combinations, NumberLocale::JaJp)
    )
}

pub fn pattern_sentence_ja(missing: usize, total: i64) -> String {
    format!(
        "選択した歯の欠損パターンは、{}本中の{}本欠損パターンの1つです。",
        total, missing
    )
}

pub fn pattern_sentence_en(missing: usize, total: i64, combinations: u128) -> String {
    pattern_sentence_en_lines(missing, total, combinations).join(" ")
}

/// The English sentence broken before "for N missing teeth", each half under 80 columns
pub fn pattern_sentence_en_lines(missing: usize, total: i64, combinations: u128) -> [String; 2] {
    [
        format!(
            "The selected pattern is one of {} possible combinations",
            format_grouped(combinations, NumberLocale::EnUs)
        ),
        format!("for {} missing teeth out of {}.", missing, total),
    ]
}

/// Shown when more slots are marked than the dentition has teeth
pub fn over_dentition_warning(missing: usize, total: i64) -> String {
    format!(
        "{}本を超えています / {} marked exceeds the {}-tooth dentition",
        total, missing, total
    )
}
