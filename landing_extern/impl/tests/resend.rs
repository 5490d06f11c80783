use std::net::{Ipv4Addr, SocketAddr, TcpListener};

use landing_extern_contracts::resend::{ResendApiService, ResendEmail, ResendEmailBody};
use landing_extern_impl::resend::{ResendApiServiceConfig, ResendApiServiceImpl};
use landing_testing::resend::{Outbox, DEFAULT_API_KEY};

#[tokio::test]
async fn send_html() {
    let (sut, outbox) = make_sut(DEFAULT_API_KEY).await;

    let id = sut
        .send_email(ResendEmail {
            from: "Landing <onboarding@resend.dev>".into(),
            to: vec!["ana@example.com".into()],
            subject: "Recebemos sua mensagem!".into(),
            body: ResendEmailBody::Html("<h1>Olá, Ana!</h1>".into()),
            reply_to: None,
        })
        .await
        .unwrap();

    let emails = outbox.emails();
    assert_eq!(emails.len(), 1);
    let email = &emails[0];
    assert_eq!(email.id, id);
    assert_eq!(email.from, "Landing <onboarding@resend.dev>");
    assert_eq!(email.to, ["ana@example.com"]);
    assert_eq!(email.subject, "Recebemos sua mensagem!");
    assert_eq!(email.html.as_deref(), Some("<h1>Olá, Ana!</h1>"));
    assert_eq!(email.text, None);
    assert_eq!(email.reply_to, None);
}

#[tokio::test]
async fn send_text_with_reply_to() {
    let (sut, outbox) = make_sut(DEFAULT_API_KEY).await;

    sut.send_email(ResendEmail {
        from: "onboarding@resend.dev".into(),
        to: vec!["owner@example.com".into()],
        subject: "Novo Contato: Orçamento".into(),
        body: ResendEmailBody::Text("Hello World!".into()),
        reply_to: Some("ana@example.com".into()),
    })
    .await
    .unwrap();

    let emails = outbox.emails();
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].text.as_deref(), Some("Hello World!"));
    assert_eq!(emails[0].html, None);
    assert_eq!(emails[0].reply_to.as_deref(), Some("ana@example.com"));
}

#[tokio::test]
async fn rejected_recipient() {
    let (sut, outbox) = make_sut(DEFAULT_API_KEY).await;

    let result = sut
        .send_email(ResendEmail {
            from: "onboarding@resend.dev".into(),
            to: vec!["ana@reject.test".into()],
            subject: "Subject".into(),
            body: ResendEmailBody::Text("Hello World!".into()),
            reply_to: None,
        })
        .await;

    let err = result.unwrap_err().to_string();
    assert!(err.contains("422"), "{err}");
    assert!(err.contains("Invalid `to` field."), "{err}");
    assert!(outbox.emails().is_empty());
}

#[tokio::test]
async fn invalid_api_key() {
    let (url, outbox) = landing_testing::resend::spawn("another key").await.unwrap();
    let sut = ResendApiServiceImpl::new(ResendApiServiceConfig::new(DEFAULT_API_KEY, Some(url)))
        .unwrap();

    let result = sut
        .send_email(ResendEmail {
            from: "onboarding@resend.dev".into(),
            to: vec!["ana@example.com".into()],
            subject: "Subject".into(),
            body: ResendEmailBody::Text("Hello World!".into()),
            reply_to: None,
        })
        .await;

    let err = result.unwrap_err().to_string();
    assert!(err.contains("401"), "{err}");
    assert!(outbox.emails().is_empty());
}

#[tokio::test]
async fn ping() {
    let (sut, _) = make_sut(DEFAULT_API_KEY).await;
    sut.ping().await.unwrap();
}

#[tokio::test]
async fn ping_unreachable() {
    let addr = {
        let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0))).unwrap();
        listener.local_addr().unwrap()
    };
    let url = format!("http://{addr}/").parse().unwrap();
    let sut = ResendApiServiceImpl::new(ResendApiServiceConfig::new(DEFAULT_API_KEY, Some(url)))
        .unwrap();

    sut.ping().await.unwrap_err();
}

async fn make_sut(api_key: &str) -> (ResendApiServiceImpl, Outbox) {
    let (url, outbox) = landing_testing::resend::spawn(api_key).await.unwrap();
    let config = ResendApiServiceConfig::new(api_key, Some(url));
    (ResendApiServiceImpl::new(config).unwrap(), outbox)
}
