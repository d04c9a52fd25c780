use cms_macros::entity_id;

#[entity_id]
struct TagId(String);

#[entity_id(debug = false)]
struct SecretId(String);

impl std::fmt::Debug for SecretId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretId(..)")
    }
}

fn main() {
    let id = TagId::new("rust");
    assert_eq!(id.to_string(), "rust");
    let _ = format!("{:?}", id); // 默认派生 Debug

    let sid = SecretId::new("s-1");
    assert_eq!(format!("{:?}", sid), "SecretId(..)"); // 手写 Debug 生效说明未重复派生
}
