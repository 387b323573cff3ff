//! # UserRepository
//!
//! ユーザーレコードの永続化を担当するリポジトリ。
//!
//! キーはメールアドレスそのもの、値は [`User`] の JSON。

use std::sync::Arc;

use async_trait::async_trait;
use edgeblog_domain::user::User;

use crate::{KvStore, error::InfraError, kv};

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
   /// メールアドレスでユーザーを検索する
   ///
   /// # 戻り値
   ///
   /// - `Ok(Some(user))`: ユーザーが見つかった場合
   /// - `Ok(None)`: ユーザーが見つからない場合
   /// - `Err(_)`: ストアエラー、または保存値が不正な JSON
   async fn find_by_email(&self, email: &str) -> Result<Option<User>, InfraError>;

   /// 同じメールアドレスのユーザーが存在しない場合のみ保存する
   ///
   /// # 戻り値
   ///
   /// 保存した場合は `true`、既に存在した場合は `false`
   async fn insert_if_absent(&self, user: &User) -> Result<bool, InfraError>;
}

/// KV ストア実装の UserRepository
#[derive(Clone)]
pub struct KvUserRepository {
   store: Arc<dyn KvStore>,
}

impl KvUserRepository {
   pub fn new(store: Arc<dyn KvStore>) -> Self {
      Self { store }
   }
}

#[async_trait]
impl UserRepository for KvUserRepository {
   async fn find_by_email(&self, email: &str) -> Result<Option<User>, InfraError> {
      kv::get_json(self.store.as_ref(), email).await
   }

   async fn insert_if_absent(&self, user: &User) -> Result<bool, InfraError> {
      kv::put_json_if_absent(self.store.as_ref(), &user.email, user).await
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;
   use crate::InMemoryKvStore;

   fn alice() -> User {
      User {
         user_id:  Some("u-1".to_string()),
         email:    "alice@example.com".to_string(),
         password: "pw".to_string(),
         username: "alice".to_string(),
      }
   }

   #[tokio::test]
   async fn test_保存したユーザーをメールアドレスで取得できる() {
      let store = Arc::new(InMemoryKvStore::new());
      let sut = KvUserRepository::new(store.clone());

      assert!(sut.insert_if_absent(&alice()).await.unwrap());

      let found = sut.find_by_email("alice@example.com").await.unwrap();
      assert_eq!(found, Some(alice()));
      // キーはメールアドレスそのもの
      assert!(store.get("alice@example.com").await.unwrap().is_some());
   }

   #[tokio::test]
   async fn test_同じメールアドレスは二度保存できない() {
      let sut = KvUserRepository::new(Arc::new(InMemoryKvStore::new()));
      let mut other = alice();
      other.username = "impostor".to_string();

      assert!(sut.insert_if_absent(&alice()).await.unwrap());
      assert!(!sut.insert_if_absent(&other).await.unwrap());

      let found = sut.find_by_email("alice@example.com").await.unwrap().unwrap();
      assert_eq!(found.username, "alice");
   }

   #[tokio::test]
   async fn test_存在しないメールアドレスはnoneを返す() {
      let sut = KvUserRepository::new(Arc::new(InMemoryKvStore::new()));

      assert_eq!(sut.find_by_email("nobody@example.com").await.unwrap(), None);
   }
}
