// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::{HashMap, HashSet};

use crate::domain::models::product::{ChangeSet, PriceChange, ProductRecord};

/// 比对服务
///
/// 以标题为键比对上一次快照与本次抓取结果。
pub struct DiffService;

impl DiffService {
    /// 计算两份商品列表的差异
    ///
    /// 对 `new` 中的每个标题：旧快照中不存在则记为新商品；存在但价格文本
    /// 不同则记为价格变动。旧快照中有、本次没有的商品（下架）不报告。
    ///
    /// # 返回值
    ///
    /// * `Some(ChangeSet)` - 至少存在一项变化
    /// * `None` - 没有任何新商品或价格变动
    pub fn diff(old: &[ProductRecord], new: &[ProductRecord]) -> Option<ChangeSet> {
        let previous: HashMap<&str, &str> = old
            .iter()
            .map(|p| (p.title.as_str(), p.price.as_str()))
            .collect();

        let mut changes = ChangeSet::default();
        let mut seen: HashSet<&str> = HashSet::with_capacity(new.len());

        for product in new {
            // Titles are unique per scan; tolerate duplicates from hand-built inputs.
            if !seen.insert(product.title.as_str()) {
                continue;
            }

            match previous.get(product.title.as_str()) {
                None => changes.new_products.push(product.clone()),
                Some(old_price) if *old_price != product.price => {
                    changes.price_changes.push(PriceChange {
                        title: product.title.clone(),
                        old_price: (*old_price).to_string(),
                        new_price: product.price.clone(),
                    });
                }
                Some(_) => {}
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes)
        }
    }
}
