//! Address extraction from conversational queries. All matching is
//! explicit ordered rule lists, no trained classifier.

use std::sync::LazyLock;

use regex::Regex;

use xinbot_core::error::{Error, Result};

/// Words that signal a "near me" request.
pub const PROXIMITY_WORDS: &[&str] = &["附近", "nearby"];
/// Words that signal a clinic/service request.
pub const CLINIC_WORDS: &[&str] = &["心據點", "門診", "看診"];

/// Leading phrases that wrap an address ("我住在...", "家在...").
const LOCATIVE_PREFIXES: &[&str] = &["我住在", "我住", "家在", "家住", "住在", "住", "在"];
/// Trailing interrogatives to trim ("...有沒有", "...嗎").
const TAIL_WORDS: &[&str] = &["有沒有", "有嗎", "嗎", "呢", "啊", "啦"];

/// Administrative regions whose name can open a bare address.
pub const CITY_NAMES: &[&str] = &[
    "台北市", "臺北市", "新北市", "桃園市", "臺中市", "台中市", "臺南市", "台南市",
    "高雄市", "基隆市", "新竹市", "嘉義市", "新竹縣", "苗栗縣", "彰化縣", "南投縣",
    "雲林縣", "嘉義縣", "屏東縣", "宜蘭縣", "花蓮縣", "臺東縣", "台東縣", "澎湖縣",
    "金門縣", "連江縣",
];

static ADDR_HEAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    let cities = CITY_NAMES.join("|");
    Regex::new(&format!("^({cities})(.*?(區|鄉|鎮|市))")).expect("static pattern")
});

/// True when the query pairs a proximity word with a clinic/service word.
pub fn mentions_nearby_clinic(query: &str) -> bool {
    PROXIMITY_WORDS.iter().any(|w| query.contains(w))
        && CLINIC_WORDS.iter().any(|w| query.contains(w))
}

/// True when the query *opens* with a recognized region followed by a
/// district/township suffix — a bare address, even without "附近".
pub fn is_direct_address(query: &str) -> bool {
    ADDR_HEAD_RE.is_match(query)
}

/// Pull a candidate address out of a nearby-clinic query.
///
/// Cuts at the proximity word, drops clinic phrases, strips locative
/// prefixes and trailing interrogatives. Fewer than four remaining
/// characters is [`Error::AddressNotFound`] — too short to geocode.
pub fn extract_address(query: &str) -> Result<String> {
    let mut q = query;

    for w in PROXIMITY_WORDS {
        if let Some(pos) = q.find(w) {
            q = &q[..pos];
        }
    }
    for w in CLINIC_WORDS {
        if let Some(pos) = q.find(w) {
            q = &q[..pos];
        }
    }

    let mut q = q.trim().to_string();
    for p in LOCATIVE_PREFIXES {
        if let Some(rest) = q.strip_prefix(p) {
            q = rest.trim().to_string();
            break;
        }
    }
    for t in TAIL_WORDS {
        if let Some(rest) = q.strip_suffix(t) {
            q = rest.trim().to_string();
        }
    }
    let q = q.trim_matches([' ', '?', '？', '!', '！']).to_string();

    if q.chars().count() < 4 {
        tracing::debug!(query, "no usable address after stripping");
        return Err(Error::AddressNotFound);
    }
    Ok(q)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_clinic_requires_both_word_classes() {
        assert!(mentions_nearby_clinic("台南市東區附近有心據點嗎"));
        assert!(mentions_nearby_clinic("我家附近有門診嗎"));
        assert!(!mentions_nearby_clinic("附近有好吃的嗎"));
        assert!(!mentions_nearby_clinic("哪裡有心據點"));
    }

    #[test]
    fn extracts_address_before_proximity_word() {
        let addr = extract_address("我住在台南市東區大學路1號附近有心據點嗎");
        assert_eq!(addr.ok().as_deref(), Some("台南市東區大學路1號"));
    }

    #[test]
    fn strips_prefixes_and_interrogative_tails() {
        let addr = extract_address("家在高雄市苓雅區四維三路2號附近有沒有門診");
        assert_eq!(addr.ok().as_deref(), Some("高雄市苓雅區四維三路2號"));
    }

    #[test]
    fn too_short_remainder_is_rejected() {
        // "附近有沒有心據點" leaves nothing before 附近.
        assert!(matches!(
            extract_address("附近有沒有心據點"),
            Err(Error::AddressNotFound)
        ));
        assert!(matches!(
            extract_address("東區附近有心據點嗎"),
            Err(Error::AddressNotFound)
        ));
    }

    #[test]
    fn direct_address_needs_city_prefix_and_district_suffix() {
        assert!(is_direct_address("台南市東區大學路1號"));
        assert!(is_direct_address("新竹縣竹北市光明六路"));
        assert!(!is_direct_address("大學路1號台南市"));
        assert!(!is_direct_address("心情不好怎麼辦"));
    }
}
