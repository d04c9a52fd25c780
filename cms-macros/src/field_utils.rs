use syn::{Field, FieldsNamed, Token, punctuated::Punctuated};

fn field_is(f: &Field, name: &str) -> bool {
    f.ident.as_ref().is_some_and(|i| i == name)
}

/// 确保具名字段结构体包含 `leading` 中的字段，并按给定顺序置于最前；
/// 已存在的同名字段复用原定义（保留用户写的属性与类型）。
/// `trailing` 中缺失的字段追加到末尾，已存在则保持原位。
pub(crate) fn ensure_fields(fields_named: &mut FieldsNamed, leading: &[Field], trailing: &[Field]) {
    let old_named = fields_named.named.clone();
    let mut new_named: Punctuated<Field, Token![,]> = Punctuated::new();

    let name_of = |f: &Field| f.ident.as_ref().map(ToString::to_string).unwrap_or_default();

    for required in leading {
        let name = name_of(required);
        match old_named.iter().find(|f| field_is(f, &name)) {
            Some(existing) => new_named.push(existing.clone()),
            None => new_named.push(required.clone()),
        }
    }

    for f in old_named.iter() {
        if !leading.iter().any(|r| field_is(f, &name_of(r))) {
            new_named.push(f.clone());
        }
    }

    for required in trailing {
        let name = name_of(required);
        if !old_named.iter().any(|f| field_is(f, &name)) {
            new_named.push(required.clone());
        }
    }

    fields_named.named = new_named;
}
