use crate::error::{CajaError, Result};
use crate::payment::InvoiceSnapshot;

/// Metadata the server-rendered invoice page exposes through meta tags.
/// Read once per command; a missing saldo means nothing has been paid yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub invoice_id: u64,
    pub total: f64,
    pub saldo: f64,
    pub estado: Option<String>,
    pub csrf_token: Option<String>,
}

impl PageMeta {
    pub fn from_html(html: &str) -> Result<Self> {
        let invoice_id = meta_content(html, "factura-id")
            .and_then(|v| v.parse().ok())
            .ok_or(CajaError::MissingMetadata("factura-id"))?;

        let total: f64 = meta_content(html, "factura-total")
            .and_then(|v| v.parse().ok())
            .ok_or(CajaError::MissingMetadata("factura-total"))?;

        let saldo = match meta_content(html, "factura-saldo") {
            Some(v) => v
                .parse()
                .map_err(|_| CajaError::MissingMetadata("factura-saldo"))?,
            None => total,
        };

        let estado = meta_content(html, "factura-estado").filter(|e| !e.is_empty());
        let csrf_token = meta_content(html, "csrf-token").filter(|t| !t.is_empty());

        Ok(Self {
            invoice_id,
            total,
            saldo,
            estado,
            csrf_token,
        })
    }

    pub fn snapshot(&self) -> InvoiceSnapshot {
        InvoiceSnapshot {
            id: self.invoice_id,
            total: self.total,
            saldo: self.saldo,
            estado: self.estado.clone(),
        }
    }
}

/// Find `<meta name="{name}" content="...">` and return the content value.
/// Attribute order within the tag does not matter.
fn meta_content(html: &str, name: &str) -> Option<String> {
    let needle = format!("name=\"{name}\"");
    let mut rest = html;
    while let Some(start) = rest.find("<meta") {
        let tag_rest = &rest[start..];
        let end = tag_rest.find('>')?;
        let tag = &tag_rest[..end];
        if tag.contains(&needle) {
            return extract_attr(tag, "content");
        }
        rest = &tag_rest[end + 1..];
    }
    None
}

fn extract_attr(tag: &str, attr: &str) -> Option<String> {
    let key = format!("{attr}=\"");
    let start = tag.find(&key)? + key.len();
    let rest = &tag[start..];
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html><html><head>
        <meta charset="utf-8">
        <meta name="factura-id" content="7">
        <meta name="factura-total" content="100.00">
        <meta name="factura-saldo" content="60.00">
        <meta name="factura-estado" content="pago parcial">
        <meta name="csrf-token" content="tok-123">
        </head><body>Factura #7</body></html>"#;

    #[test]
    fn reads_all_metadata() {
        let meta = PageMeta::from_html(PAGE).unwrap();
        assert_eq!(meta.invoice_id, 7);
        assert_eq!(meta.total, 100.0);
        assert_eq!(meta.saldo, 60.0);
        assert_eq!(meta.estado.as_deref(), Some("pago parcial"));
        assert_eq!(meta.csrf_token.as_deref(), Some("tok-123"));
    }

    #[test]
    fn missing_saldo_defaults_to_total() {
        let html = r#"<meta name="factura-id" content="3">
            <meta name="factura-total" content="85.50">"#;
        let meta = PageMeta::from_html(html).unwrap();
        assert_eq!(meta.saldo, 85.5);
        assert!(meta.csrf_token.is_none());
    }

    #[test]
    fn attribute_order_does_not_matter() {
        let html = r#"<meta content="12" name="factura-id">
            <meta content="10.00" name="factura-total">"#;
        let meta = PageMeta::from_html(html).unwrap();
        assert_eq!(meta.invoice_id, 12);
    }

    #[test]
    fn missing_id_is_an_error() {
        let html = r#"<meta name="factura-total" content="10.00">"#;
        let err = PageMeta::from_html(html).unwrap_err();
        assert!(matches!(err, CajaError::MissingMetadata("factura-id")));
    }

    #[test]
    fn unparseable_total_is_an_error() {
        let html = r#"<meta name="factura-id" content="7">
            <meta name="factura-total" content="n/a">"#;
        let err = PageMeta::from_html(html).unwrap_err();
        assert!(matches!(err, CajaError::MissingMetadata("factura-total")));
    }
}
