/// アクセスリクエストまわりのエンティティ ID を定義する宣言型マクロ
///
/// 生成されるもの:
/// - `Uuid` をラップする `Copy` な Newtype（シリアライズは UUID 文字列）
/// - `new()`: UUID v7 を採番（作成順にソート可能）
/// - `Display`（ログのフィールド値や URL に埋め込む）
///
/// # 使用例
///
/// ```rust
/// use accessrequests_domain::access_request::{AccessRequestId, SecretLinkId};
///
/// let first = AccessRequestId::new();
/// let second = AccessRequestId::new();
/// assert_ne!(first, second);
/// assert_eq!(SecretLinkId::new().to_string().len(), 36);
/// ```
macro_rules! define_entity_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq,
            serde::Serialize,
            derive_more::Display,
        )]
        #[serde(transparent)]
        #[display("{_0}")]
        $vis struct $Name(uuid::Uuid);

        impl $Name {
            /// 新しい ID を採番する
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }
        }

        impl Default for $Name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

/// アクセス申請フォームの入力欄を表す String Newtype を定義する宣言型マクロ
///
/// `new()` は前後の空白を除去したうえで、空でないことと文字数上限を検証する。
/// エラーメッセージには欄のラベルが入る。
///
/// 末尾の `redacted` / `plain` で `Debug` 出力を切り替える。
/// 申請者を特定できる欄は `redacted` にして、ログやパニックメッセージに値を出さない。
///
/// # 使用例
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use accessrequests_domain::value_objects::{Justification, SenderName};
///
/// let name = SenderName::new("  Jane Doe ")?;
/// assert_eq!(name.as_str(), "Jane Doe");
/// assert_eq!(format!("{name:?}"), "SenderName(<redacted>)");
///
/// let reason = Justification::new("For my research")?;
/// assert_eq!(format!("{reason:?}"), "Justification(\"For my research\")");
/// # Ok(())
/// # }
/// ```
macro_rules! define_form_field {
    (@debug redacted $Name:ident) => {
        impl std::fmt::Debug for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!(stringify!($Name), "(<redacted>)"))
            }
        }
    };

    (@debug plain $Name:ident) => {
        impl std::fmt::Debug for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($Name)).field(&self.0).finish()
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident: $label:literal, max $max_chars:literal, $debug:ident;
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, serde::Serialize)]
        #[serde(transparent)]
        $vis struct $Name(String);

        impl $Name {
            pub fn new(value: impl Into<String>) -> Result<Self, $crate::DomainError> {
                let value = value.into();
                let value = value.trim();

                if value.is_empty() {
                    return Err($crate::DomainError::Validation(
                        concat!($label, "を入力してください").to_string(),
                    ));
                }
                let chars = value.chars().count();
                if chars > $max_chars {
                    return Err($crate::DomainError::Validation(format!(
                        concat!($label, "は {} 文字以内で入力してください（現在 {} 文字）"),
                        $max_chars, chars
                    )));
                }

                Ok(Self(value.to_owned()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        define_form_field!(@debug $debug $Name);
    };
}
