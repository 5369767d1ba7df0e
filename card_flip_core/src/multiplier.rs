//! 倍率表与加权抽样
//!
//! 倍率表在启动时加载并校验一次，之后只读。它以显式参数的形式传给抽样函数，
//! 而不是全局状态，测试时可以直接换成固定的表。

use crate::color::Rgb;
use crate::error::ConfigurationError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 倍率表中的一项。`chance` 是相对权重，不是概率。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplierEntry {
    pub value: f64,
    pub chance: f64,
    /// 显式指定的展示颜色；缺省时按倍率分档取色
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
}

/// 抽中的倍率及其展示颜色
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Multiplier {
    pub value: f64,
    pub color: Rgb,
}

impl MultiplierEntry {
    pub fn new(value: f64, chance: f64) -> MultiplierEntry {
        MultiplierEntry { value, chance, color: None }
    }

    pub fn with_color(mut self, color: Rgb) -> MultiplierEntry {
        self.color = Some(color);
        self
    }

    pub fn color(&self) -> Rgb {
        self.color.unwrap_or_else(|| Rgb::for_multiplier(self.value))
    }

    pub fn multiplier(&self) -> Multiplier {
        Multiplier { value: self.value, color: self.color() }
    }
}

/// 校验过的倍率表：非空，每项权重为正，总权重为正。
/// JSON 形式就是一个 `{ value, chance, color? }` 数组。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MultiplierEntry>", into = "Vec<MultiplierEntry>")]
pub struct MultiplierTable {
    entries: Vec<MultiplierEntry>,
    total_weight: f64,
}

impl MultiplierTable {
    pub fn new(entries: Vec<MultiplierEntry>) -> Result<MultiplierTable, ConfigurationError> {
        if entries.is_empty() {
            return Err(ConfigurationError::EmptyTable);
        }
        for (index, entry) in entries.iter().enumerate() {
            if !entry.chance.is_finite() || entry.chance <= 0.0 {
                return Err(ConfigurationError::InvalidChance { index, chance: entry.chance });
            }
            if !entry.value.is_finite() || entry.value < 0.0 {
                return Err(ConfigurationError::InvalidValue { index, value: entry.value });
            }
        }
        let total_weight: f64 = entries.iter().map(|e| e.chance).sum();
        if !total_weight.is_finite() || total_weight <= 0.0 {
            return Err(ConfigurationError::InvalidTotal(total_weight));
        }
        Ok(MultiplierTable { entries, total_weight })
    }

    pub fn from_json(json: &str) -> Result<MultiplierTable, ConfigurationError> {
        let entries: Vec<MultiplierEntry> = serde_json::from_str(json)?;
        MultiplierTable::new(entries)
    }

    /// 内置的标准倍率表
    pub fn standard() -> MultiplierTable {
        let entries = [
            (10.0, 3.0),
            (5.0, 6.0),
            (3.0, 13.0),
            (2.0, 23.0),
            (1.0, 55.0),
            (4.0, 7.0),
            (2.0, 9.0),
            (0.6, 15.0),
            (0.3, 50.0),
            (0.0, 19.0),
        ]
        .into_iter()
        .map(|(value, chance)| MultiplierEntry::new(value, chance))
        .collect::<Vec<_>>();
        let total_weight = entries.iter().map(|e| e.chance).sum();
        MultiplierTable { entries, total_weight }
    }

    pub fn entries(&self) -> &[MultiplierEntry] {
        &self.entries
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// 按累计权重查找：返回第一个累计权重 >= roll 的项。
    /// 边界相等时靠前的项胜出；浮点误差导致无项命中时返回最后一项。
    pub fn select(&self, roll: f64) -> &MultiplierEntry {
        let mut cumulative = 0.0;
        for entry in &self.entries {
            cumulative += entry.chance;
            if cumulative >= roll {
                return entry;
            }
        }
        &self.entries[self.entries.len() - 1]
    }

    /// 在 [0, total_weight) 上均匀取值后查表
    pub fn draw_entry<R: Rng + ?Sized>(&self, rng: &mut R) -> &MultiplierEntry {
        let roll = rng.random_range(0.0..self.total_weight);
        let entry = self.select(roll);
        debug!(roll, value = entry.value, "drew multiplier");
        entry
    }

    pub fn draw_multiplier<R: Rng + ?Sized>(&self, rng: &mut R) -> Multiplier {
        self.draw_entry(rng).multiplier()
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.draw_entry(rng).value
    }
}

impl Default for MultiplierTable {
    fn default() -> Self {
        MultiplierTable::standard()
    }
}

impl TryFrom<Vec<MultiplierEntry>> for MultiplierTable {
    type Error = ConfigurationError;

    fn try_from(entries: Vec<MultiplierEntry>) -> Result<Self, Self::Error> {
        MultiplierTable::new(entries)
    }
}

impl From<MultiplierTable> for Vec<MultiplierEntry> {
    fn from(table: MultiplierTable) -> Self {
        table.entries
    }
}

/// 倍率展示格式，例如 `2.00x`
pub fn format_multiplier(value: f64) -> String {
    format!("{:.2}x", value)
}

/// 金额展示格式，例如 `$1.00`
pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}

// --- 单元测试 ---

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn table(pairs: &[(f64, f64)]) -> Result<MultiplierTable, ConfigurationError> {
        MultiplierTable::new(pairs.iter().map(|&(v, c)| MultiplierEntry::new(v, c)).collect())
    }

    #[test]
    fn test_single_entry_always_drawn() {
        let t = MultiplierTable::from_json(r#"[{"value":1,"chance":1}]"#).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..1000 {
            assert_eq!(t.draw(&mut rng), 1.0);
        }
    }

    #[test]
    fn test_standard_table_total_weight() {
        let t = MultiplierTable::standard();
        assert_eq!(t.entries().len(), 10);
        assert_eq!(t.total_weight(), 200.0);
        // 与经过校验的构造结果一致
        assert_eq!(MultiplierTable::new(t.entries().to_vec()).unwrap(), t);
    }

    #[test]
    fn test_select_boundaries_favour_earlier_entry() {
        let t = table(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]).unwrap();
        assert_eq!(t.select(0.0).value, 1.0);
        assert_eq!(t.select(1.0).value, 1.0);
        assert_eq!(t.select(1.000_001).value, 2.0);
        assert_eq!(t.select(3.0).value, 2.0);
        assert_eq!(t.select(5.9).value, 3.0);
    }

    #[test]
    fn test_select_falls_back_to_last_entry() {
        let t = table(&[(1.0, 1.0), (9.0, 2.0)]).unwrap();
        assert_eq!(t.select(3.5).value, 9.0);
        assert_eq!(t.select(f64::MAX).value, 9.0);
    }

    #[test]
    fn test_draw_never_leaves_the_table() {
        let t = MultiplierTable::standard();
        let values: Vec<f64> = t.entries().iter().map(|e| e.value).collect();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..20_000 {
            let v = t.draw(&mut rng);
            assert!(values.contains(&v), "{v} is not in the table");
        }
    }

    #[test]
    fn test_draw_frequencies_converge() {
        const N: usize = 100_000;
        let t = table(&[(10.0, 1.0), (2.0, 3.0), (0.5, 6.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts = [0usize; 3];
        for _ in 0..N {
            match t.draw(&mut rng) {
                v if v == 10.0 => counts[0] += 1,
                v if v == 2.0 => counts[1] += 1,
                _ => counts[2] += 1,
            }
        }
        // 容差取 5 个标准差，σ = sqrt(p(1-p)/N)
        for (i, entry) in t.entries().iter().enumerate() {
            let p = entry.chance / t.total_weight();
            let observed = counts[i] as f64 / N as f64;
            let tolerance = 5.0 * (p * (1.0 - p) / N as f64).sqrt();
            assert!(
                (observed - p).abs() < tolerance,
                "entry {i}: observed {observed}, expected {p} ± {tolerance}"
            );
        }
    }

    #[test]
    fn test_duplicate_values_are_separate_entries() {
        // 标准表中 2.0 出现两次，两项的权重应当合并体现在频率里
        let t = MultiplierTable::standard();
        let mut rng = StdRng::seed_from_u64(5);
        const N: usize = 50_000;
        let hits = (0..N).filter(|_| t.draw(&mut rng) == 2.0).count();
        let p = (23.0 + 9.0) / 200.0;
        let tolerance = 5.0 * (p * (1.0 - p) / N as f64).sqrt();
        assert!((hits as f64 / N as f64 - p).abs() < tolerance);
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(table(&[]), Err(ConfigurationError::EmptyTable));
        assert_eq!(
            table(&[(1.0, 1.0), (2.0, 0.0)]),
            Err(ConfigurationError::InvalidChance { index: 1, chance: 0.0 })
        );
        assert_eq!(
            table(&[(1.0, -3.0)]),
            Err(ConfigurationError::InvalidChance { index: 0, chance: -3.0 })
        );
        assert_eq!(
            table(&[(-1.0, 1.0)]),
            Err(ConfigurationError::InvalidValue { index: 0, value: -1.0 })
        );
        assert!(matches!(table(&[(1.0, f64::NAN)]), Err(ConfigurationError::InvalidChance { .. })));
        assert!(matches!(table(&[(f64::INFINITY, 1.0)]), Err(ConfigurationError::InvalidValue { .. })));
        assert!(matches!(
            table(&[(1.0, f64::MAX), (1.0, f64::MAX)]),
            Err(ConfigurationError::InvalidTotal(_))
        ));
        assert_eq!(
            ConfigurationError::InvalidTotal(f64::INFINITY).to_string(),
            "total weight must be a positive finite number, got inf"
        );
    }

    #[test]
    fn test_json_errors() {
        assert_eq!(MultiplierTable::from_json("[]"), Err(ConfigurationError::EmptyTable));
        assert!(matches!(MultiplierTable::from_json("{"), Err(ConfigurationError::Parse(_))));
        assert!(matches!(
            MultiplierTable::from_json(r#"[{"value":1}]"#),
            Err(ConfigurationError::Parse(_))
        ));
        // 通过 serde 直接反序列化同样会校验
        assert!(serde_json::from_str::<MultiplierTable>(r#"[{"value":1,"chance":0}]"#).is_err());
    }

    #[test]
    fn test_json_colours() {
        let t = MultiplierTable::from_json(
            r##"[{"value":2,"chance":1,"color":"#123456"},{"value":2,"chance":1}]"##,
        )
        .unwrap();
        assert_eq!(t.entries()[0].color(), Rgb::new(0x12, 0x34, 0x56));
        assert_eq!(t.entries()[1].color(), Rgb::for_multiplier(2.0));
        assert!(MultiplierTable::from_json(r#"[{"value":2,"chance":1,"color":"red"}]"#).is_err());
    }

    #[test]
    fn test_serializes_as_bare_array() {
        let t = table(&[(1.5, 2.0)]).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"[{"value":1.5,"chance":2.0}]"#);
        assert_eq!(MultiplierTable::from_json(&json).unwrap(), t);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_multiplier(2.0), "2.00x");
        assert_eq!(format_multiplier(0.3), "0.30x");
        assert_eq!(format_amount(1.0), "$1.00");
        assert_eq!(format_amount(12.5), "$12.50");
    }
}
