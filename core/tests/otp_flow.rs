//! End-to-end OTP lifecycle tests through the service boundary

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use otp_core::errors::{AuthError, DomainError, RateLimitReason};
use otp_core::repositories::MemoryStateStore;
use otp_core::services::auth::AuthService;
use otp_core::store::UserStore;
use otp_shared::config::OtpConfig;

const PHONE: &str = "13800138000";

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()
}

fn service_over(
    backend: Arc<MemoryStateStore>,
) -> AuthService<Arc<MemoryStateStore>> {
    AuthService::new(
        Arc::new(UserStore::new(backend)),
        OtpConfig::default(),
    )
}

#[tokio::test]
async fn full_login_flow() {
    let service = service_over(Arc::new(MemoryStateStore::new()));

    // Request at T0, blocked at T0+30s, allowed again at T0+61s
    let first = service.request_code_at(PHONE, t0()).await.unwrap();
    assert_eq!(first.code.len(), 6);

    let blocked = service
        .request_code_at(PHONE, t0() + Duration::seconds(30))
        .await;
    assert!(matches!(
        blocked,
        Err(DomainError::Auth(AuthError::RateLimited(
            RateLimitReason::Cooldown { .. }
        )))
    ));

    let resend_at = t0() + Duration::seconds(61);
    let second = service.request_code_at(PHONE, resend_at).await.unwrap();

    // The second code verifies four minutes later; the first is dead
    let submit_at = resend_at + Duration::minutes(4);
    if first.code != second.code {
        let stale = service.submit_code_at(PHONE, &first.code, submit_at).await;
        assert!(stale.is_err(), "reissue must discard the previous code");
    }
    service
        .submit_code_at(PHONE, &second.code, submit_at)
        .await
        .unwrap();
    assert!(service.is_logged_in(PHONE).await.unwrap());

    // Single use: resubmission fails
    let again = service.submit_code_at(PHONE, &second.code, submit_at).await;
    assert!(matches!(
        again,
        Err(DomainError::Auth(AuthError::InvalidOrExpiredCode))
    ));
}

#[tokio::test]
async fn state_survives_restart() {
    let backend = Arc::new(MemoryStateStore::new());

    {
        let service = service_over(backend.clone());
        let issued = service.request_code_at(PHONE, t0()).await.unwrap();
        service
            .submit_code_at(PHONE, &issued.code, t0() + Duration::minutes(1))
            .await
            .unwrap();
    }

    // A fresh store over the same backend sees the persisted state
    let store = UserStore::new(backend);
    assert_eq!(store.load().await.unwrap(), 1);

    let state = store.get_or_create(PHONE).await;
    assert!(state.is_logged_in);
    assert!(state.active_code.is_none());
    assert_eq!(state.today_send_count, 1);
    assert_eq!(state.last_send_at, Some(t0()));
    assert_eq!(state.last_send_day, Some(t0().date_naive()));
}

#[tokio::test]
async fn quota_resets_across_days() {
    let service = service_over(Arc::new(MemoryStateStore::new()));

    for i in 0..5 {
        service
            .request_code_at(PHONE, t0() + Duration::seconds(i * 61))
            .await
            .unwrap();
    }
    let exhausted = service
        .request_code_at(PHONE, t0() + Duration::seconds(5 * 61))
        .await;
    assert!(matches!(
        exhausted,
        Err(DomainError::Auth(AuthError::RateLimited(
            RateLimitReason::DailyQuota { limit: 5 }
        )))
    ));

    // The next UTC day the quota is fresh
    let next_day = t0() + Duration::days(1);
    service.request_code_at(PHONE, next_day).await.unwrap();
    assert_eq!(
        service.store().get_or_create(PHONE).await.today_send_count,
        1
    );
}

#[tokio::test]
async fn quotas_are_independent_per_phone() {
    let service = service_over(Arc::new(MemoryStateStore::new()));

    for i in 0..5 {
        service
            .request_code_at(PHONE, t0() + Duration::seconds(i * 61))
            .await
            .unwrap();
    }

    // Another phone number is unaffected
    service
        .request_code_at("13900139000", t0() + Duration::seconds(5 * 61))
        .await
        .unwrap();
}
