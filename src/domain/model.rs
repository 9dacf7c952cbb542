use std::collections::BTreeMap;
use std::fmt;

/// `+<countrycode><digits>` 形式的電話號碼
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedNumber(String);

impl NormalizedNumber {
    pub(crate) fn from_digits(prefix: &str, digits: &str) -> Self {
        Self(format!("{}{}", prefix, digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for NormalizedNumber {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// 單一號碼查詢後的最終狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Capable,
    NotCapable,
    Errored,
}

/// 從輸入檔讀出的原始號碼列（已去除空白行）
#[derive(Debug, Clone, Default)]
pub struct RawInput {
    pub lines: Vec<String>,
}

impl RawInput {
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// 一次批次查詢的結果
///
/// `availability` 只包含查詢成功的號碼，依查詢順序（即字典序）排列；
/// 查詢失敗的號碼只會出現在 `errored`。
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub availability: BTreeMap<NormalizedNumber, bool>,
    pub errored: Vec<NormalizedNumber>,
}

impl CheckReport {
    pub fn record(&mut self, number: NormalizedNumber, capable: bool) {
        self.availability.insert(number, capable);
    }

    pub fn record_error(&mut self, number: NormalizedNumber) {
        self.errored.push(number);
    }

    pub fn status_of(&self, number: &NormalizedNumber) -> Option<Availability> {
        match self.availability.get(number) {
            Some(true) => Some(Availability::Capable),
            Some(false) => Some(Availability::NotCapable),
            None if self.errored.contains(number) => Some(Availability::Errored),
            None => None,
        }
    }

    pub fn capable(&self) -> Vec<&NormalizedNumber> {
        self.availability
            .iter()
            .filter(|(_, ok)| **ok)
            .map(|(number, _)| number)
            .collect()
    }

    pub fn capable_count(&self) -> usize {
        self.availability.values().filter(|ok| **ok).count()
    }

    pub fn not_capable_count(&self) -> usize {
        self.availability.len() - self.capable_count()
    }

    pub fn checked_count(&self) -> usize {
        self.availability.len() + self.errored.len()
    }
}
