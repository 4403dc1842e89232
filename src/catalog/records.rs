// Record types module
// Fixed-shape customer and product records

use serde::Serialize;

/// Record identifier, unique within its collection
pub type RecordId = u32;

/// Customer record
///
/// The id lives in the collection key, so it is not repeated in the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub name: String,
    pub age: i64,
    pub address: String,
    pub phone: String,
}

/// Product record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub title: String,
    pub price: i64,
    pub description: String,
    pub category: String,
}

impl Customer {
    fn new(name: &str, age: i64, address: &str, phone: &str) -> Self {
        Self {
            name: name.to_string(),
            age,
            address: address.to_string(),
            phone: phone.to_string(),
        }
    }
}

impl Product {
    fn new(title: &str, price: i64, description: &str, category: &str) -> Self {
        Self {
            title: title.to_string(),
            price,
            description: description.to_string(),
            category: category.to_string(),
        }
    }
}

pub(super) fn seed_customers() -> Vec<(RecordId, Customer)> {
    vec![
        (1, Customer::new("김철수", 35, "서울시 강남구", "010-1234-5678")),
        (2, Customer::new("이영희", 28, "부산시 해운대구", "010-2345-6789")),
        (3, Customer::new("박민수", 42, "대구시 수성구", "010-3456-7890")),
        (4, Customer::new("정수진", 31, "인천시 연수구", "010-4567-8901")),
        (5, Customer::new("최현우", 26, "광주시 서구", "010-5678-9012")),
    ]
}

pub(super) fn seed_products() -> Vec<(RecordId, Product)> {
    vec![
        (1, Product::new("노트북", 1_200_000, "고성능 게이밍 노트북", "전자제품")),
        (2, Product::new("스마트폰", 800_000, "최신 스마트폰", "전자제품")),
        (3, Product::new("운동화", 120_000, "편안한 러닝화", "의류")),
        (4, Product::new("책상", 200_000, "인체공학적 책상", "가구")),
        (5, Product::new("커피머신", 350_000, "프리미엄 커피머신", "가전제품")),
    ]
}
