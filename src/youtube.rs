//! YouTube URL handling: video id extraction and playback link construction.

use url::Url;

/// Extract the video id from a YouTube watch or short URL.
///
/// Accepts any `youtube.com` host (www, m, music) via the `v` query parameter
/// and `youtu.be` short links via the path. Returns `None` for other hosts,
/// unparseable URLs, and empty ids.
pub fn extract_video_id(raw_url: &str) -> Option<String> {
    let parsed = Url::parse(raw_url).ok()?;
    let host = parsed.host_str()?;

    if host.contains("youtube.com") {
        for (key, value) in parsed.query_pairs() {
            if key == "v" {
                let id = value.into_owned();
                return if id.is_empty() { None } else { Some(id) };
            }
        }
        return None;
    }

    if host == "youtu.be" {
        let id = parsed.path().trim_start_matches('/');
        if !id.is_empty() {
            return Some(id.to_string());
        }
    }

    None
}

/// Direct watch link that starts playback at `start_sec`.
pub fn watch_url(video_id: &str, start_sec: u64) -> String {
    format!(
        "https://www.youtube.com/watch?v={}&t={}s",
        video_id, start_sec
    )
}

/// Privacy-enhanced embed link that starts playback at `start_sec`.
pub fn embed_url(video_id: &str, start_sec: u64) -> String {
    format!(
        "https://www.youtube-nocookie.com/embed/{}?start={}",
        video_id, start_sec
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_extract_ignores_other_query_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?list=PL123&v=abc123&t=42"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_extract_from_mobile_and_music_hosts() {
        assert_eq!(
            extract_video_id("https://m.youtube.com/watch?v=abc"),
            Some("abc".to_string())
        );
        assert_eq!(
            extract_video_id("https://music.youtube.com/watch?v=xyz"),
            Some("xyz".to_string())
        );
    }

    #[test]
    fn test_extract_from_short_url() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_rejects_missing_or_empty_id() {
        assert_eq!(extract_video_id("https://www.youtube.com/watch"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v="), None);
        assert_eq!(extract_video_id("https://youtu.be/"), None);
    }

    #[test]
    fn test_rejects_foreign_hosts_and_garbage() {
        assert_eq!(extract_video_id("https://vimeo.com/123456"), None);
        assert_eq!(extract_video_id("not a url at all"), None);
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn test_watch_url_format() {
        assert_eq!(
            watch_url("abc123", 61),
            "https://www.youtube.com/watch?v=abc123&t=61s"
        );
    }

    #[test]
    fn test_embed_url_format() {
        assert_eq!(
            embed_url("abc123", 61),
            "https://www.youtube-nocookie.com/embed/abc123?start=61"
        );
    }
}
