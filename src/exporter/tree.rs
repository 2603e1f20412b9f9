// ==========================================
// 商品目录馈送生成器 - 树形（YML）导出器
// ==========================================
// 结构: yml_catalog → shop → offers → offer*
// 红线: 文本中的 & < > 只转义一次
// 红线: 输出首行固定为 XML 声明
// ==========================================

use crate::config::config_manager::FeedSettings;
use crate::domain::product::{CanonicalRecord, MergedTable};
use crate::engine::error::{FeedError, FeedResult};
use chrono::NaiveDateTime;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::info;

/// yml_catalog 的 date 属性格式
pub const CATALOG_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

// ==========================================
// XmlOut - quick-xml Writer 的薄封装
// ==========================================
struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn write(&mut self, event: Event<'_>) -> FeedResult<()> {
        self.writer
            .write_event(event)
            .map_err(|e| FeedError::Render(e.to_string()))
    }

    fn open(&mut self, element: BytesStart<'_>) -> FeedResult<()> {
        self.write(Event::Start(element))
    }

    fn close(&mut self, name: &str) -> FeedResult<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// <name attr..>text</name>
    fn text_element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> FeedResult<()> {
        let mut element = BytesStart::new(name);
        for attr in attrs {
            element.push_attribute(*attr);
        }
        self.open(element)?;
        self.write(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
        self.close(name)
    }

    fn simple(&mut self, name: &str, text: &str) -> FeedResult<()> {
        self.text_element(name, &[], text)
    }

    fn finish(self) -> FeedResult<String> {
        String::from_utf8(self.writer.into_inner()).map_err(|e| FeedError::Render(e.to_string()))
    }
}

// ==========================================
// TreeExporter - 树形导出器
// ==========================================
pub struct TreeExporter<'s> {
    settings: &'s FeedSettings,
}

impl<'s> TreeExporter<'s> {
    pub fn new(settings: &'s FeedSettings) -> Self {
        Self { settings }
    }

    /// 导出为 UTF-8 XML 文本
    ///
    /// # 参数
    /// - merged: 合并结果（空编码记录跳过）
    /// - keywords: 关键词（为空时不输出 key_requests）
    /// - catalog_date: 目录日期（None 时不输出 date 属性）
    pub fn export(
        &self,
        merged: &MergedTable,
        keywords: &[String],
        catalog_date: Option<NaiveDateTime>,
    ) -> FeedResult<String> {
        let mut out = XmlOut::new();
        out.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut catalog = BytesStart::new("yml_catalog");
        if let Some(date) = catalog_date {
            let rendered = date.format(CATALOG_DATE_FORMAT).to_string();
            catalog.push_attribute(("date", rendered.as_str()));
        }
        out.open(catalog)?;
        out.open(BytesStart::new("shop"))?;
        out.open(BytesStart::new("offers"))?;

        let keyword_text = keywords.join(", ");
        let mut offers = 0usize;
        for record in merged.emittable() {
            self.write_offer(&mut out, record, &keyword_text)?;
            offers += 1;
        }

        out.close("offers")?;
        out.close("shop")?;
        out.close("yml_catalog")?;

        let mut xml = out.finish()?;
        xml.push('\n');
        info!(offers, bytes = xml.len(), "树形导出完成");
        Ok(xml)
    }

    fn write_offer(
        &self,
        out: &mut XmlOut,
        record: &CanonicalRecord,
        keyword_text: &str,
    ) -> FeedResult<()> {
        let id = record.id.trim();
        let mut offer = BytesStart::new("offer");
        offer.push_attribute(("id", id));
        offer.push_attribute(("available", "true"));
        out.open(offer)?;

        let texts = [
            ("name", &record.name),
            ("name_ua", &record.name_translated),
            ("description", &record.description),
            ("description_ua", &record.description_translated),
        ];
        for (tag, value) in texts {
            if !value.is_empty() {
                out.simple(tag, value)?;
            }
        }

        if let Some(price) = record.price {
            out.simple("price", &price.to_string())?;
        }
        out.simple("currencyId", &self.settings.currency)?;

        // 非数值库存不输出
        if record.numeric_quantity().is_some() {
            if let Some(qty) = record.quantity.as_ref() {
                out.simple("quantity_in_stock", qty.to_text().trim())?;
            }
        }

        if !keyword_text.is_empty() {
            out.simple("key_requests", keyword_text)?;
        }

        for url in &record.photos {
            out.simple("picture", url)?;
        }

        for attr in record.attributes.iter().take(self.settings.max_attributes) {
            out.text_element("param", &[("name", attr.label.as_str())], &attr.value)?;
        }

        out.close("offer")
    }
}
