//! 客户端外壳：标签页、过滤词、按 id 编辑/删除、导出

use std::io;
use std::sync::Arc;

use tracing::error;
use uuid::Uuid;

use super::{
    api::ProductApi,
    cache::ProductCache,
    export,
    form::{FormController, FormError, FormState},
    view::{self, CardView, TableView},
    Notice,
};

const LOAD_FAILED: &str = "Unable to fetch products from backend.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    View,
    Add,
    About,
}

pub struct InventoryApp {
    cache: Arc<ProductCache>,
    form: Arc<FormController>,
    filter: String,
    active: Tab,
}

impl InventoryApp {
    pub fn new(api: Arc<dyn ProductApi>) -> Self {
        Self {
            cache: Arc::new(ProductCache::new(api)),
            form: Arc::new(FormController::new()),
            filter: String::new(),
            active: Tab::View,
        }
    }

    pub fn cache(&self) -> &Arc<ProductCache> {
        &self.cache
    }

    pub fn form(&self) -> &Arc<FormController> {
        &self.form
    }

    pub fn active_tab(&self) -> Tab {
        self.active
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// 初始加载
    pub async fn load(&self) -> Option<Notice> {
        match self.cache.refresh().await {
            Ok(_) => None,
            Err(e) => {
                error!("Initial load failed: {}", e);
                Some(Notice::error(LOAD_FAILED))
            }
        }
    }

    /// 切换标签页；切到列表页时重新加载
    pub async fn open_tab(&mut self, tab: Tab) -> Option<Notice> {
        self.active = tab;
        if tab == Tab::View {
            self.load().await
        } else {
            None
        }
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub async fn table(&self) -> TableView {
        view::render_table(&self.cache.products().await, &self.filter)
    }

    pub async fn cards(&self) -> CardView {
        view::render_cards(&self.cache.products().await, &self.filter)
    }

    /// 按 id 开始编辑并切到表单页
    pub async fn edit(&mut self, id: Uuid) -> Notice {
        match self.cache.find(id).await {
            Some(product) => {
                self.form.begin_edit(&product).await;
                self.active = Tab::Add;
                Notice::info("Editing product. Make changes and click Save.")
            }
            None => Notice::error(format!("Product {id} is not in the current list.")),
        }
    }

    pub async fn cancel_edit(&mut self) {
        self.form.cancel().await;
    }

    /// 提交表单，成功后切回列表页
    pub async fn submit(&mut self) -> Notice {
        match self.form.submit(&self.cache).await {
            Ok(notice) => {
                self.active = Tab::View;
                notice
            }
            Err(e @ FormError::Refresh(_)) => {
                self.active = Tab::View;
                Notice::error(e.to_string())
            }
            Err(e) => {
                if !matches!(e, FormError::Invalid(_)) {
                    error!("Submit failed: {}", e);
                }
                Notice::error(e.to_string())
            }
        }
    }

    pub async fn delete(&mut self, id: Uuid) -> Notice {
        if let Err(e) = self.cache.api().delete(id).await {
            error!("Delete of {} failed: {}", id, e);
            return Notice::error(format!("Delete failed, check backend: {e}"));
        }

        // 正在编辑的记录被删除后不能再提交更新
        if matches!(self.form.state().await, FormState::Editing { id: editing, .. } if editing == id)
        {
            self.form.cancel().await;
        }

        match self.cache.refresh().await {
            Ok(_) => Notice::success("Product deleted successfully!"),
            Err(_) => Notice::error(LOAD_FAILED),
        }
    }

    /// 将当前缓存导出为 CSV
    pub async fn export_csv<W: io::Write>(&self, writer: W) -> Result<Notice, csv::Error> {
        export::write_csv(&self.cache.products().await, writer)?;
        Ok(Notice::success("CSV exported."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::app::product::{model::ProductFields, service::ProductService};
    use crate::client::{api::LocalProductApi, form::FormInput, NoticeKind};
    use crate::store::MemoryProductStore;

    async fn app_with(products: &[ProductFields]) -> (InventoryApp, LocalProductApi) {
        let api = LocalProductApi::new(ProductService::new(Arc::new(MemoryProductStore::new())));
        for fields in products {
            api.create(fields).await.unwrap();
        }
        let app = InventoryApp::new(Arc::new(api.clone()));
        assert!(app.load().await.is_none());
        (app, api)
    }

    #[tokio::test]
    async fn scenario_low_stock_flag_in_rendered_rows() {
        let (mut app, _) = app_with(&[]).await;

        app.open_tab(Tab::Add).await;
        app.form()
            .set_input(FormInput::new("Widget", "3", "9.99", "Tools"))
            .await;
        assert_eq!(app.submit().await.kind, NoticeKind::Success);
        app.form()
            .set_input(FormInput::new("Gadget", "10", "4.50", "Tools"))
            .await;
        app.submit().await;

        assert_eq!(app.active_tab(), Tab::View);
        let TableView::Rows(rows) = app.table().await else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 2);
        assert!(rows[0].low_stock);
        assert!(!rows[1].low_stock);
    }

    #[tokio::test]
    async fn edit_and_delete_are_wired_by_id_under_filter() {
        let (mut app, _) = app_with(&[
            ProductFields::new("Widget", "Tools", 3.0, 9.99),
            ProductFields::new("Desk Lamp", "Furniture", 7.0, 25.0),
        ])
        .await;

        app.set_filter("lamp");
        let TableView::Rows(rows) = app.table().await else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 1);
        let lamp_id = rows[0].id;

        let notice = app.edit(lamp_id).await;
        assert_eq!(notice.kind, NoticeKind::Info);
        assert_eq!(app.active_tab(), Tab::Add);
        assert_eq!(app.form().input().await.name, "Desk Lamp");

        let notice = app.delete(lamp_id).await;
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(app.form().state().await, FormState::Creating);
        assert_eq!(app.table().await, TableView::Placeholder(view::NO_RESULTS));

        app.set_filter("");
        assert_eq!(app.cache().len().await, 1);
    }

    #[tokio::test]
    async fn cancel_edit_leaves_record_untouched() {
        let (mut app, _) = app_with(&[ProductFields::new("Widget", "Tools", 3.0, 9.99)]).await;
        let id = app.cache().products().await[0].id;

        app.edit(id).await;
        app.form()
            .set_input(FormInput::new("Changed", "1", "1", "Tools"))
            .await;
        app.cancel_edit().await;

        assert_eq!(app.form().state().await, FormState::Creating);
        assert_eq!(app.form().input().await, FormInput::default());
        app.open_tab(Tab::View).await;
        assert_eq!(app.cache().find(id).await.unwrap().name, "Widget");
    }

    #[tokio::test]
    async fn unknown_id_is_reported() {
        let (mut app, _) = app_with(&[]).await;

        assert!(app.edit(Uuid::new_v4()).await.is_error());
        assert!(app.delete(Uuid::new_v4()).await.is_error());
    }

    #[tokio::test]
    async fn validation_failure_stays_on_form() {
        let (mut app, _) = app_with(&[]).await;
        app.open_tab(Tab::Add).await;
        app.form()
            .set_input(FormInput::new("Widget1", "3", "9.99", "Tools"))
            .await;

        let notice = app.submit().await;

        assert_eq!(notice, Notice::error("Product Name must contain letters only!"));
        assert_eq!(app.active_tab(), Tab::Add);
        assert!(app.cache().is_empty().await);
    }

    #[tokio::test]
    async fn view_tab_reloads_changes_made_elsewhere() {
        let (mut app, api) = app_with(&[]).await;
        api.create(&ProductFields::new("Widget", "Tools", 3.0, 9.99))
            .await
            .unwrap();
        assert!(app.cache().is_empty().await);

        app.open_tab(Tab::View).await;
        assert_eq!(app.cache().len().await, 1);
    }

    #[tokio::test]
    async fn export_writes_cached_products() {
        let (app, _) = app_with(&[ProductFields::new("Widget", "Tools", 3.0, 9.99)]).await;
        let mut out = Vec::new();

        let notice = app.export_csv(&mut out).await.unwrap();

        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Product,Category,Quantity,Price\nWidget,Tools,3,9.99\n"
        );
    }
}
