// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 商品记录
///
/// 抓取到的单个商品条目。标题在一次扫描内唯一，作为比对键；
/// 价格保留页面上的展示文本（含货币符号），不做数值解析。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// 商品标题
    pub title: String,
    /// 展示价格，例如 `£51.77`
    pub price: String,
}

impl ProductRecord {
    pub fn new(title: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price: price.into(),
        }
    }
}

/// 单个商品的价格变动
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceChange {
    pub title: String,
    pub old_price: String,
    pub new_price: String,
}

/// 两次快照之间的差异集合
///
/// 只有在至少一个列表非空时才会被构造，"无变化" 由 `Option::None` 表达。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// 新上架的商品，顺序与本次抓取结果一致
    pub new_products: Vec<ProductRecord>,
    /// 价格发生变化的商品，顺序与本次抓取结果一致
    pub price_changes: Vec<PriceChange>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.new_products.is_empty() && self.price_changes.is_empty()
    }
}
