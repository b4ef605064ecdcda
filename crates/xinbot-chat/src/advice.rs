//! Curated advice scenarios, matched by keyword co-occurrence and
//! answered from pre-authored content — no search involved.

use xinbot_core::types::AdviceDoc;

/// One curated scenario: every trigger group must have at least one
/// keyword present in the query for the scenario to fire.
pub struct AdviceScenario {
    pub id: &'static str,
    pub title: &'static str,
    pub triggers: &'static [&'static [&'static str]],
    pub advice: &'static [&'static str],
}

impl std::fmt::Debug for AdviceScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdviceScenario").field("id", &self.id).finish()
    }
}

impl PartialEq for AdviceScenario {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

pub const SCENARIOS: &[AdviceScenario] = &[
    AdviceScenario {
        id: "depression_seek_doctor",
        title: "考慮就醫的低落情緒",
        triggers: &[
            &["憂鬱", "情緒低落", "心情低落", "心情不好"],
            &["看醫生", "就醫", "身心科", "精神科", "看診", "門診"],
        ],
        advice: &[
            "願意考慮就醫是很勇敢的一步，身心科門診和一般感冒看診一樣平常。",
            "可以先從離家近的身心科診所或醫院的身心醫學科掛號開始。",
            "初診前，把最近的睡眠、食慾、情緒變化簡單記下來，會幫助醫師了解狀況。",
            "若出現傷害自己的念頭，請立即撥打安心專線 1925，全天有人接聽。",
        ],
    },
    AdviceScenario {
        id: "dementia_family_concern",
        title: "擔心家人記憶退化",
        triggers: &[
            &["失智", "健忘", "記憶力", "記性"],
            &["家人", "爸爸", "媽媽", "父親", "母親", "長輩", "爺爺", "奶奶", "阿公", "阿嬤"],
        ],
        advice: &[
            "偶爾忘東忘西和失智不同，重點是「近期記憶」是否明顯退步、影響生活。",
            "可以陪長輩到神經內科或記憶門診做認知評估，越早確認越能安排照護。",
            "對話時少用「你又忘了」這類字眼，多用提示和固定的生活規律來幫忙。",
            "照顧者自己的喘息也重要，各縣市都有失智共同照護中心可以求助。",
        ],
    },
    AdviceScenario {
        id: "child_screen_overuse",
        title: "孩子離不開 3C",
        triggers: &[
            &["小孩", "孩子", "兒子", "女兒"],
            &["手機", "平板", "3c", "螢幕", "電動", "遊戲"],
        ],
        advice: &[
            "先了解孩子在螢幕裡做什麼、和誰互動，比直接沒收更能開啟對話。",
            "和孩子一起訂規則：固定時段、固定時長，家長自己也一起遵守。",
            "安排能取代螢幕的活動（運動、桌遊、一起做飯），讓「不用手機」有事可做。",
            "若已影響睡眠、課業或情緒，可尋求學校輔導室或兒童心智科協助。",
        ],
    },
    AdviceScenario {
        id: "inlaw_childcare_conflict",
        title: "和公婆的育兒拉扯",
        triggers: &[
            &["婆婆", "公婆", "婆媳"],
            &["帶小孩", "帶孩子", "育兒", "顧小孩", "教養"],
        ],
        advice: &[
            "教養衝突多半不是誰對誰錯，而是兩代照顧習慣不同，先肯定對方的付出。",
            "夫妻先對齊立場，由「自己的孩子」出面和自己的父母溝通，效果通常最好。",
            "挑安全、健康這類非讓步不可的事堅持，其他生活習慣可以放寬一些。",
            "安排只有小家庭的相處時間，減少摩擦場景，也讓彼此有喘息空間。",
        ],
    },
];

/// First scenario whose trigger groups all co-occur in the query.
pub fn match_scenario(query: &str) -> Option<&'static AdviceScenario> {
    SCENARIOS.iter().find(|s| {
        s.triggers
            .iter()
            .all(|group| group.iter().any(|kw| query.contains(kw)))
    })
}

impl AdviceScenario {
    pub fn to_doc(&self) -> AdviceDoc {
        AdviceDoc {
            scenario: self.id.to_string(),
            title: self.title.to_string(),
            advice: self.advice.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}
