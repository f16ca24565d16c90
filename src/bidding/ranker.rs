// src/bidding/ranker.rs

use std::cmp::Ordering;

use crate::model::campaign::Campaign;

/// 按价格从高到低排序；同价保持评估顺序（稳定排序），不引入其他排序键
pub fn rank_by_price(eligible: &mut [&Campaign]) {
    eligible.sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidding::fixtures::sample_campaign;

    #[test]
    fn highest_price_first_and_ties_keep_catalog_order() {
        let mut a = sample_campaign();
        a.price = 3.0;
        a.code = Some("a".into());
        let mut b = sample_campaign();
        b.price = 5.0;
        b.code = Some("b".into());
        let mut c = sample_campaign();
        c.price = 3.0;
        c.code = Some("c".into());

        let mut ranked = vec![&a, &b, &c];
        rank_by_price(&mut ranked);
        let codes: Vec<_> = ranked.iter().map(|c| c.code.as_deref().unwrap()).collect();
        assert_eq!(codes, vec!["b", "a", "c"]);
    }
}
