// ==========================================
// 商品目录馈送生成器 - 字段别名表
// ==========================================
// 职责: 规范字段 → 可接受表头拼写（英/乌/俄）
// 红线: 列表顺序即优先级,具体拼写必须排在通用拼写之前
// 红线: 特征别名表顺序即输出顺序
// ==========================================

/// 规范字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Id,
    Name,
    Price,
    Quantity,
    Description,
    Photos,
}

impl CanonicalField {
    /// 字段键（日志、校验报告中使用）
    pub fn key(&self) -> &'static str {
        match self {
            CanonicalField::Id => "id",
            CanonicalField::Name => "name",
            CanonicalField::Price => "price",
            CanonicalField::Quantity => "qty",
            CanonicalField::Description => "description",
            CanonicalField::Photos => "photos",
        }
    }

    /// 可接受的表头拼写（全部小写），按优先级排列
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::Id => ID_ALIASES,
            CanonicalField::Name => NAME_ALIASES,
            CanonicalField::Price => PRICE_ALIASES,
            CanonicalField::Quantity => QTY_ALIASES,
            CanonicalField::Description => DESCRIPTION_ALIASES,
            CanonicalField::Photos => PHOTO_ALIASES,
        }
    }
}

pub const ID_ALIASES: &[&str] = &["product code", "main sku", "код", "артикул"];

pub const NAME_ALIASES: &[&str] = &["name", "назва", "название"];

pub const QTY_ALIASES: &[&str] = &["quantity", "кількість", "количество"];

// 特价优先于普通价格
pub const PRICE_ALIASES: &[&str] = &["special price", "price", "ціна", "цена"];

pub const DESCRIPTION_ALIASES: &[&str] = &["description", "опис", "описание"];

// 既支持单列逗号分隔，也支持每张图一列
pub const PHOTO_ALIASES: &[&str] = &[
    "main photo",
    "photo1",
    "photo2",
    "photo3",
    "photo4",
    "photo5",
    "photo6",
    "photo7",
    "photo8",
    "photo9",
    "photo10",
    "посилання_зображення",
    "изображение",
];

/// (源列名, 规范特征名)
pub const ATTRIBUTE_ALIASES: &[(&str, &str)] = &[
    ("size of the set", "Розмір комплекту"),
    ("size extra", "Додатковий розмір"),
    ("sheet size", "Розмір простирадла"),
    ("size of the pillowcase", "Розмір наволочки"),
    ("dimensions of the duvet cover", "Розмір підковдри"),
    ("fabric type", "Тип тканини"),
    ("composition", "Склад"),
    ("density", "Щільність"),
    ("color", "Колір"),
    ("country of manufacture", "Країна виробник"),
    ("brand registration country", "Країна реєстрації бренду"),
    ("producer", "Виробник"),
    ("sheet", "Простирадло"),
    ("pillowcase", "Наволочка"),
    ("a feature of pillowcases", "Особливість наволочок"),
    ("sheet with elastic band", "Простирадло на резинці"),
    ("gift packaging", "Подарункова упаковка"),
    ("available layout options", "Доступні комплектації"),
    ("fabrics \"a\" (top of the quilt)", "Тканина A (верх ковдри)"),
    ("fabrics \"b\" (bed sheet)", "Тканина B (простирадло)"),
    ("bonus", "Бонус"),
];
