//! HTML email template rendered with tera.
//!
//! The template is embedded at compile time and is fully self-contained:
//! inline CSS only, no images, fonts or stylesheets fetched from elsewhere.
//! Caller-supplied values go through tera's HTML autoescaping.

use tera::{Context, Tera};

use crate::error::NotifyError;
use crate::request::NotificationRequest;

use super::catalog::DELIVERED_STATUS;

/// Brand name used in the subject, header and footer.
pub const BRAND: &str = "CUSTOM SOUND";

const ORDER_STATUS_TEMPLATE: &str = "order_status.html";

/// Subject line for an order.
pub fn subject(order_id: &str) -> String {
    format!("Обновление статуса заказа {order_id} - {BRAND}")
}

/// Tera engine with the embedded order-status template.
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self, NotifyError> {
        let mut engine = Tera::default();

        engine.add_raw_templates(vec![(
            ORDER_STATUS_TEMPLATE,
            include_str!("../../templates/order_status.html"),
        )])?;

        Ok(Self { engine })
    }

    /// Render the full HTML document.
    pub fn render_html(
        &self,
        request: &NotificationRequest,
        status_phrase: &str,
    ) -> Result<String, NotifyError> {
        let mut context = Context::new();
        context.insert("brand", BRAND);
        context.insert("order_id", &request.order_id);
        context.insert("status", &request.status);
        context.insert("status_phrase", status_phrase);
        context.insert(
            "order_total",
            &request.order_total.as_ref().map(|total| total.to_string()),
        );
        context.insert("delivered", &(request.status == DELIVERED_STATUS));

        Ok(self.engine.render(ORDER_STATUS_TEMPLATE, &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::OrderTotal;

    fn request(order_id: &str, status: &str, total: Option<u64>) -> NotificationRequest {
        NotificationRequest {
            to_email: "a@b.ru".to_string(),
            order_id: order_id.to_string(),
            status: status.to_string(),
            order_total: total.map(|t| OrderTotal(t.into())),
        }
    }

    #[test]
    fn test_subject() {
        assert_eq!(subject("A-100"), "Обновление статуса заказа A-100 - CUSTOM SOUND");
    }

    #[test]
    fn test_renderer_initializes() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_render_substitutes_fields() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_html(&request("A-100", "Доставлен", Some(15000)), "успешно доставлен")
            .unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<strong>Заказ:</strong> A-100</p>"));
        assert!(html.contains("<span class=\"status\">Доставлен</span>"));
        assert!(html.contains("<strong>Сумма:</strong> 15,000 ₽</p>"));
        assert!(html.contains("Ваш заказ <strong>успешно доставлен</strong>."));
        assert!(html.contains("Благодарим вас за покупку!"));
        assert!(html.contains("© 2024 CUSTOM SOUND."));
    }

    #[test]
    fn test_conditional_blocks_absent() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_html(&request("A-100", "Новый", None), "принят и находится в обработке")
            .unwrap();

        assert!(!html.contains("Сумма:"));
        assert!(!html.contains("Благодарим вас за покупку!"));
    }

    #[test]
    fn test_markup_in_fields_is_escaped() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_html(&request("<script>x</script>", "<b>\"Новый\"</b>", None), "обновлен")
            .unwrap();

        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;script&gt;x&lt;"));
        assert!(html.contains("&lt;b&gt;&quot;Новый&quot;&lt;"));
    }
}
