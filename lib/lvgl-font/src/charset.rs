//! Unicode code point and range tables, and the batching of explicit code points into `-r`
//! arguments.

use std::{collections::BTreeSet, fmt, num::NonZeroUsize};

/// The number of explicit code points placed in a single `-r` argument.
///
/// A single `-r` argument holding every code point can exceed the platform's command line limit.
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(size) => size,
    None => unreachable!(),
};

/// Printable ASCII.
pub const ASCII: CodeRange = CodeRange::new(0x20, 0x7F);
/// CJK Symbols and Punctuation.
pub const CJK_PUNCTUATION: CodeRange = CodeRange::new(0x3000, 0x303F);
/// CJK Unified Ideographs Extension A.
pub const CJK_EXTENSION_A: CodeRange = CodeRange::new(0x3400, 0x4DBF);
/// CJK Unified Ideographs.
pub const CJK_UNIFIED: CodeRange = CodeRange::new(0x4E00, 0x9FFF);
/// The leading part of CJK Unified Ideographs, which holds most frequently used characters.
pub const CJK_UNIFIED_COMMON: CodeRange = CodeRange::new(0x4E00, 0x5FFF);
/// Halfwidth and Fullwidth Forms.
pub const HALFWIDTH_FULLWIDTH: CodeRange = CodeRange::new(0xFF00, 0xFFEF);

/// ASCII and CJK punctuation, always included alongside explicit code points.
pub const BASIC_RANGES: &[CodeRange] = &[ASCII, CJK_PUNCTUATION];

/// Full coverage of the CJK blocks used by simplified Chinese text.
pub const FULL_CHINESE_RANGES: &[CodeRange] = &[
    ASCII,
    CJK_UNIFIED,
    CJK_PUNCTUATION,
    CJK_EXTENSION_A,
    HALFWIDTH_FULLWIDTH,
];

/// Reduced coverage for small sizes, where the full blocks produce oversized sources.
pub const COMMON_CHINESE_RANGES: &[CodeRange] = &[ASCII, CJK_UNIFIED_COMMON, CJK_PUNCTUATION];

/// Frequently used Chinese characters.
///
/// The table contains repeats; use [`code_points`] to obtain the distinct set.
pub const COMMON_CHINESE_CHARS: &str = concat!(
    "的一是在不了有和人这中大为上个国我以要他时来用们生到作地于出就分对成会可主发年动同工也能下过子说产种面而方后多定行学法所民得经十三之进着等部度家电力里如水化高自二理起小物现实加量都两体制机当使点从业本去把性好应开它合还因由其些然前外天政四日那社义事平形相全表间样与关各重新线内数正心反你明看原又么利比或但质气第向道命此变条只没结解问意建月公无系军很情者最立代想已通并提直题党程展五果料象员革位入常文总次品式活设及管特件长求老头基资边流路级少图山统接知较将组见计别她手角期根论运农指几九区强放决西被干做必战先回则任取据处队南给色光门即保治北造百规热领七海口东导器压志世金增争济阶油思术极交受联什认六共权收证改清己美再采转更单风切打白教速花带安场身车例真务具万每目至达走积示议声报斗完类八离华名确才科张信马节话米整空元况今集温传土许步群广石记需段研界拉林律叫且究观越织装影算低持音众书布复容儿须际商非验连断深难近矿千周委素技备半办青省列习响约支般史感劳便团往酸历市克何除消构府称太准精值号率族维划选标写存候毛亲快效斯院查江型眼王按格养易置派层片始却专状育厂京识适属圆包火住调满县局照参红细引听该铁价严",
    "首底液官德调随病苦倒注意云造字施展台环境食住房严格执行计划经济体制改革开放政策法律法规制度建设发展社会主义市场经济科学技术教育文化卫生体育新闻出版广播电视电影艺术哲学社会科学自然科学工程技术农业林业水利交通运输邮电通信商业贸易金融保险房地产建筑业制造业采掘业电力煤气水生产供应业",
);

/// A single Unicode code point.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct CodePoint(pub u32);

impl From<char> for CodePoint {
    fn from(value: char) -> Self {
        Self(u32::from(value))
    }
}

impl fmt::Display for CodePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// An inclusive range of Unicode code points.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct CodeRange {
    start: u32,
    end: u32,
}

impl CodeRange {
    /// Creates a new [`CodeRange`] covering `start..=end`.
    ///
    /// # Panics
    ///
    /// Panics if `start` is greater than `end`.
    pub const fn new(start: u32, end: u32) -> Self {
        assert!(start <= end, "inverted code point range");

        Self { start, end }
    }
}

impl fmt::Display for CodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}-0x{:X}", self.start, self.end)
    }
}

/// Returns the code points of the distinct characters in `chars`, in order of first occurrence.
pub fn code_points(chars: &str) -> Vec<CodePoint> {
    let mut seen = BTreeSet::new();

    chars
        .chars()
        .filter(|&c| seen.insert(c))
        .map(CodePoint::from)
        .collect()
}

/// Splits `points` into groups of at most `batch_size` code points, rendering each group as a
/// comma separated `-r` argument value.
pub fn batch_arguments(points: &[CodePoint], batch_size: NonZeroUsize) -> Vec<String> {
    points
        .chunks(batch_size.get())
        .map(|batch| {
            batch
                .iter()
                .map(CodePoint::to_string)
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect()
}

/// Renders `ranges` as `-r` argument values.
pub fn range_arguments(ranges: &[CodeRange]) -> Vec<String> {
    ranges.iter().map(CodeRange::to_string).collect()
}
