//! CSV 导出

use std::io;

use crate::app::product::model::Product;

pub const CSV_HEADER: [&str; 4] = ["Product", "Category", "Quantity", "Price"];

/// 默认导出文件名
pub const DEFAULT_EXPORT_FILE: &str = "inventory.csv";

/// 每个产品一行；含逗号或引号的字段会按 CSV 规则加引号
pub fn write_csv<W: io::Write>(products: &[Product], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for p in products {
        let qty = p.qty.to_string();
        let price = p.price.to_string();
        wtr.write_record([p.name.as_str(), p.category.as_str(), qty.as_str(), price.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(products: &[Product]) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    write_csv(products, &mut buf)?;
    // csv 写入器只输出来自 String 的 UTF-8 内容
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    use crate::app::product::model::ProductFields;

    fn product(name: &str, category: &str, qty: f64, price: f64) -> Product {
        Product::new(Uuid::new_v4(), ProductFields::new(name, category, qty, price))
    }

    #[test]
    fn writes_header_and_one_row_per_product() {
        let csv = to_csv_string(&[
            product("Widget", "Tools", 3.0, 9.99),
            product("Gadget", "Tools", 10.0, 4.5),
        ])
        .unwrap();

        assert_eq!(
            csv,
            "Product,Category,Quantity,Price\nWidget,Tools,3,9.99\nGadget,Tools,10,4.5\n"
        );
    }

    #[test]
    fn empty_inventory_is_header_only() {
        assert_eq!(to_csv_string(&[]).unwrap(), "Product,Category,Quantity,Price\n");
    }

    #[test]
    fn embedded_commas_and_quotes_are_escaped() {
        let csv = to_csv_string(&[product("Nuts, Bolts", "Say \"hi\"", 1.0, 2.0)]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, r#""Nuts, Bolts","Say ""hi""",1,2"#);
    }
}
