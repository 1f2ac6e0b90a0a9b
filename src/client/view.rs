//! 视图渲染
//!
//! 纯函数：由产品列表和过滤词得到表格行或卡片，没有独立状态。
//! 只有过滤词非空且没有匹配时才显示占位提示；空缓存配空过滤词时
//! 返回空列表。

use std::fmt;

use uuid::Uuid;

use crate::app::product::model::Product;

/// 无匹配时的占位文本
pub const NO_RESULTS: &str = "No products found.";

/// 名称或分类包含过滤词（不区分大小写）即匹配，空过滤词匹配全部
pub fn matches(product: &Product, filter: &str) -> bool {
    let needle = filter.trim().to_lowercase();
    needle.is_empty()
        || product.name.to_lowercase().contains(&needle)
        || product.category.to_lowercase().contains(&needle)
}

pub fn filter_products<'a>(products: &'a [Product], filter: &str) -> Vec<&'a Product> {
    products.iter().filter(|p| matches(p, filter)).collect()
}

/// 表格中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// 编辑/删除按钮绑定的 id
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub qty: String,
    pub price: String,
    pub low_stock: bool,
}

/// 卡片视图中的一张卡片
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub quantity: String,
    pub price: String,
    pub low_stock: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableView {
    Rows(Vec<TableRow>),
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardView {
    Cards(Vec<ProductCard>),
    Placeholder(&'static str),
}

fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

fn show_placeholder(filter: &str, matched: usize) -> bool {
    matched == 0 && !filter.trim().is_empty()
}

pub fn render_table(products: &[Product], filter: &str) -> TableView {
    let matched = filter_products(products, filter);
    if show_placeholder(filter, matched.len()) {
        return TableView::Placeholder(NO_RESULTS);
    }

    TableView::Rows(
        matched
            .into_iter()
            .map(|p| TableRow {
                id: p.id,
                name: p.name.clone(),
                category: p.category.clone(),
                qty: p.qty.to_string(),
                price: format_price(p.price),
                low_stock: p.is_low_stock(),
            })
            .collect(),
    )
}

pub fn render_cards(products: &[Product], filter: &str) -> CardView {
    let matched = filter_products(products, filter);
    if show_placeholder(filter, matched.len()) {
        return CardView::Placeholder(NO_RESULTS);
    }

    CardView::Cards(
        matched
            .into_iter()
            .map(|p| ProductCard {
                id: p.id,
                title: p.name.clone(),
                category: p.category.clone(),
                quantity: p.qty.to_string(),
                price: format_price(p.price),
                low_stock: p.is_low_stock(),
            })
            .collect(),
    )
}

fn qty_cell(qty: &str, low_stock: bool) -> String {
    if low_stock {
        format!("{qty} (low)")
    } else {
        qty.to_string()
    }
}

impl fmt::Display for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = match self {
            TableView::Placeholder(message) => return writeln!(f, "{message}"),
            TableView::Rows(rows) => rows,
        };

        let header = ["Product", "Category", "Quantity", "Price", "ID"];
        let cells: Vec<[String; 5]> = rows
            .iter()
            .map(|r| {
                [
                    r.name.clone(),
                    r.category.clone(),
                    qty_cell(&r.qty, r.low_stock),
                    r.price.clone(),
                    r.id.to_string(),
                ]
            })
            .collect();

        let mut widths = header.map(str::len);
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header: Vec<String> = header.iter().map(|h| h.to_string()).collect();
        for line in std::iter::once(&header[..]).chain(cells.iter().map(|c| &c[..])) {
            let padded: Vec<String> = line
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect();
            writeln!(f, "{}", padded.join("  ").trim_end())?;
        }
        Ok(())
    }
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards = match self {
            CardView::Placeholder(message) => return writeln!(f, "{message}"),
            CardView::Cards(cards) => cards,
        };

        for card in cards {
            writeln!(f, "{}", card.title)?;
            writeln!(f, "  Category: {}", card.category)?;
            writeln!(f, "  Quantity: {}", qty_cell(&card.quantity, card.low_stock))?;
            writeln!(f, "  Price: {}", card.price)?;
            writeln!(f, "  ID: {}", card.id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::product::model::ProductFields;

    fn product(name: &str, category: &str, qty: f64, price: f64) -> Product {
        Product::new(Uuid::new_v4(), ProductFields::new(name, category, qty, price))
    }

    fn inventory() -> Vec<Product> {
        vec![
            product("Widget", "Tools", 3.0, 9.99),
            product("Gadget", "Tools", 10.0, 4.5),
            product("Desk Lamp", "Furniture", 7.0, 25.0),
        ]
    }

    #[test]
    fn filter_is_case_insensitive_on_name_or_category() {
        let products = inventory();

        let by_name: Vec<&str> = filter_products(&products, "LAMP")
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(by_name, ["Desk Lamp"]);

        let by_category = filter_products(&products, "tOOls");
        assert_eq!(by_category.len(), 2);
    }

    #[test]
    fn empty_filter_matches_everything() {
        let products = inventory();
        assert_eq!(filter_products(&products, "").len(), 3);
        assert_eq!(filter_products(&products, "   ").len(), 3);
    }

    #[test]
    fn filtering_is_idempotent() {
        let products = inventory();
        let once: Vec<Product> = filter_products(&products, "ge").into_iter().cloned().collect();
        let twice: Vec<Product> = filter_products(&once, "ge").into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn low_stock_flag_follows_threshold() {
        let TableView::Rows(rows) = render_table(&inventory(), "") else {
            panic!("expected rows");
        };
        assert!(rows[0].low_stock);
        assert!(!rows[1].low_stock);
        assert_eq!(rows[0].price, "$9.99");
        assert_eq!(rows[1].price, "$4.50");
        assert_eq!(rows[0].qty, "3");
    }

    #[test]
    fn placeholder_only_for_non_empty_filter_without_matches() {
        assert_eq!(
            render_table(&inventory(), "nothing"),
            TableView::Placeholder(NO_RESULTS)
        );
        assert_eq!(
            render_cards(&inventory(), "nothing"),
            CardView::Placeholder(NO_RESULTS)
        );

        assert_eq!(render_table(&[], ""), TableView::Rows(vec![]));
        assert_eq!(render_cards(&[], ""), CardView::Cards(vec![]));
    }

    #[test]
    fn cards_carry_ids_for_actions() {
        let products = inventory();
        let CardView::Cards(cards) = render_cards(&products, "furniture") else {
            panic!("expected cards");
        };
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, products[2].id);
    }

    #[test]
    fn table_text_marks_low_stock() {
        let text = render_table(&inventory(), "widget").to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Product"));
        assert!(lines[1].contains("3 (low)"));
        assert!(lines[1].contains("$9.99"));
    }
}
