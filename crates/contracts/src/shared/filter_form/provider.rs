use super::schema::{validate_schema, FieldSchema, OptionValue, SchemaError};

/// Источник схемы формы. Called once, when the user asks to load the form.
pub trait SchemaProvider: Send + Sync {
    fn schema(&self) -> Vec<FieldSchema>;
}

/// Захардкоженная схема фильтра квартир (демо-данные)
#[derive(Debug, Clone, Copy, Default)]
pub struct MockSchemaProvider;

impl SchemaProvider for MockSchemaProvider {
    fn schema(&self) -> Vec<FieldSchema> {
        apartment_filter_schema()
    }
}

pub fn apartment_filter_schema() -> Vec<FieldSchema> {
    fn opts<const N: usize>(items: [OptionValue; N]) -> Vec<OptionValue> {
        items.into_iter().collect()
    }

    vec![
        FieldSchema::multi_select(
            "Корпус",
            opts([1.into(), 2.into(), 3.into(), 4.into(), "4а".into(), "46".into()]),
        ),
        FieldSchema::select("Отделка", opts(["Все".into(), "Есть".into(), "Нет".into()])),
        FieldSchema::multi_select(
            "Комнаты",
            opts([
                "Студия".into(),
                1.into(),
                2.into(),
                3.into(),
                4.into(),
                "4+".into(),
            ]),
        ),
        FieldSchema::multi_select(
            "Срок сдачи",
            opts(["Сдан".into(), "II кв 2025".into(), "I кв 2025".into()]),
        ),
        FieldSchema::range("Этаж", 1.0, 20.0),
        FieldSchema::range("Площадь, м²", 10.0, 100.0),
        FieldSchema::range("Цена, млн ₽", 1.0, 20.0),
    ]
}

/// Schema read from a JSON document such as
/// `[{"type": "select", "label": "Отделка", "options": ["Все", "Есть", "Нет"]}]`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonSchemaProvider {
    schema: Vec<FieldSchema>,
}

impl JsonSchemaProvider {
    pub fn from_json(raw: &str) -> Result<Self, SchemaError> {
        let schema: Vec<FieldSchema> =
            serde_json::from_str(raw).map_err(|e| SchemaError::Parse(e.to_string()))?;
        validate_schema(&schema)?;
        Ok(Self { schema })
    }
}

impl SchemaProvider for JsonSchemaProvider {
    fn schema(&self) -> Vec<FieldSchema> {
        self.schema.clone()
    }
}
