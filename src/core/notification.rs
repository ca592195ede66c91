use crate::domain::model::Notification;
use chrono::{DateTime, Local};

/// Composes the availability email for `url`, stamped with `now`.
pub fn compose(
    from: &str,
    to: &str,
    subject: &str,
    url: &str,
    now: DateTime<Local>,
) -> Notification {
    let stamp = now.format("%d.%m.%Y %H:%M:%S").to_string();
    let host = display_host(url);

    let text_body = format!(
        "
Hallo!

Auf {url} sind wieder Coaching-Plätze verfügbar!

👉 Jetzt schnell buchen: {url}

(Automatische Benachrichtigung vom {stamp})
"
    );

    let html_body = format!(
        r#"
<html><body style="font-family:sans-serif;max-width:500px;margin:40px auto;">
  <h2 style="color:#2ecc71">🎉 Coaching-Plätze sind wieder frei!</h2>
  <p>Auf <a href="{url}">{host}</a> sind wieder Plätze verfügbar.</p>
  <p>
    <a href="{url}" style="background:#2ecc71;color:white;padding:12px 24px;
       text-decoration:none;border-radius:6px;font-weight:bold;display:inline-block;">
      Jetzt buchen →
    </a>
  </p>
  <p style="color:#999;font-size:12px;">Automatische Benachrichtigung vom {stamp}</p>
</body></html>
"#
    );

    Notification {
        from: from.to_string(),
        to: to.to_string(),
        subject: subject.to_string(),
        text_body,
        html_body,
    }
}

// Link text: host without "www.", falling back to the raw URL.
fn display_host(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
        .unwrap_or_else(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_bodies_carry_url_and_timestamp() {
        let now = Local.with_ymd_and_hms(2026, 3, 7, 9, 5, 0).unwrap();
        let n = compose(
            "checker@example.com",
            "me@example.com",
            "Frei!",
            "https://www.coachingbyed.de/jetzt-buchen/",
            now,
        );

        assert_eq!(n.subject, "Frei!");
        assert_eq!(n.from, "checker@example.com");
        assert!(n.text_body.contains("https://www.coachingbyed.de/jetzt-buchen/"));
        assert!(n.text_body.contains("07.03.2026 09:05:00"));
        assert!(n.html_body.contains(r#"<a href="https://www.coachingbyed.de/jetzt-buchen/">coachingbyed.de</a>"#));
        assert!(n.html_body.contains("07.03.2026 09:05:00"));
    }

    #[test]
    fn test_display_host_falls_back_to_url() {
        assert_eq!(display_host("https://shop.example.com/x"), "shop.example.com");
        assert_eq!(display_host("not a url"), "not a url");
    }
}
