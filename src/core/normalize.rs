use crate::domain::model::NormalizedNumber;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static NON_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\D+").unwrap());

/// 將任意字串整理成 `+<digits>` 格式（以美國號碼為預設）
///
/// - 10 碼：補上 `+1`
/// - 11 碼且以 `1` 開頭：補上 `+`
/// - 其他長度：直接補 `+`，空字串會得到 `+`
///
/// 只是格式轉換，不驗證號碼是否真實存在。已經帶有非美國國碼的號碼
/// 會原樣保留，例如 `+447911123456`。
pub fn normalize(raw: &str) -> NormalizedNumber {
    // `\d` 涵蓋所有 Unicode 十進位數字，長度以字元計算
    let digits = NON_DIGITS.replace_all(raw, "");

    if digits.chars().count() == 10 {
        NormalizedNumber::from_digits("+1", &digits)
    } else {
        // 11 碼且開頭為 1 的情況也只需補上 `+`
        NormalizedNumber::from_digits("+", &digits)
    }
}

/// 正規化後去除重複，並依字典序排列，確保每次執行的查詢順序相同
pub fn unique_numbers<I, S>(raws: I) -> Vec<NormalizedNumber>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raws.into_iter()
        .map(|raw| normalize(raw.as_ref()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
