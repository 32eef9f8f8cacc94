use std::collections::HashMap;
use std::sync::LazyLock;

/// Display labels for the known shopping categories, keyed by normalized name.
pub static CATEGORY_LABELS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert("produce", "Hortifruti 🍎");
    m.insert("dairy", "Laticínios 🧀");
    m.insert("meat", "Carnes 🥩");
    m.insert("pantry", "Despensa 🥫");
    m.insert("bakery", "Padaria 🍞");
    m.insert("frozen", "Congelados 🧊");
    m.insert("beverages", "Bebidas 🥤");
    m.insert("seafood", "Peixes e Frutos do Mar 🐟");
    m.insert("household", "Casa 🏠");
    m.insert("supplements", "Suplementos 💊");
    m.insert("spices", "Temperos 🧂");
    m.insert("grains", "Grãos 🍚");
    m.insert("pasta", "Massas 🍝");
    m.insert("canned", "Enlatados 🥫");
    m.insert("vegetables", "Vegetais 🥦");
    m.insert("fruits", "Frutas 🍇");
    m.insert("snacks", "Lanches 🍿");
    m.insert("oils", "Óleos e Gorduras 🫒");
    m.insert("condiments", "Condimentos 🍅");
    m
});

/// Label for a category.
///
/// Unknown categories fall back to the raw string with its first letter
/// upper-cased.
pub fn translate_category(category: &str) -> String {
    let key = category.trim().to_lowercase();
    match CATEGORY_LABELS.get(key.as_str()) {
        Some(label) => label.to_string(),
        None => capitalize_first(category),
    }
}

fn capitalize_first(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
