//! Raw provider response bodies, trimmed from real responses

use serde_json::{json, Value};

/// Two tracks, a user and a playlist mixed in one collection
pub fn soundcloud_search() -> Value {
    json!({
        "collection": [
            {
                "kind": "user",
                "id": 1001,
                "username": "lofi-girl",
                "permalink_url": "https://soundcloud.com/lofi-girl"
            },
            {
                "kind": "track",
                "id": 2001,
                "title": "Midnight Drive",
                "duration": 125000,
                "artwork_url": "https://i1.sndcdn.com/artworks-2001-large.jpg",
                "permalink": "midnight-drive",
                "permalink_url": "https://soundcloud.com/nightcrew/midnight-drive",
                "created_at": "2023-04-01T10:00:00Z",
                "playback_count": 5120,
                "description": null,
                "user": {
                    "username": "nightcrew",
                    "permalink": "nightcrew",
                    "avatar_url": "https://i1.sndcdn.com/avatars-nightcrew.jpg"
                }
            },
            {
                "kind": "playlist",
                "id": 3001,
                "title": "Chill mix",
                "permalink_url": "https://soundcloud.com/nightcrew/sets/chill-mix"
            },
            {
                "kind": "track",
                "id": 2002,
                "title": "Sunrise",
                "duration": 9000,
                "artwork_url": null,
                "permalink": "sunrise",
                "description": "Short intro",
                "user": {
                    "username": "daybreak",
                    "permalink": "daybreak",
                    "avatar_url": "https://i1.sndcdn.com/avatars-daybreak.jpg"
                }
            }
        ],
        "total_results": 4
    })
}

pub fn mixcloud_search() -> Value {
    json!({
        "data": [
            {
                "key": "/djshadow/essential-mix/",
                "slug": "essential-mix",
                "name": "Essential Mix",
                "url": "https://www.mixcloud.com/djshadow/essential-mix/",
                "audio_length": 7265,
                "created_time": "2019-06-02T18:00:00Z",
                "play_count": 4200,
                "user": {"name": "DJ Shadow", "username": "djshadow"},
                "pictures": {
                    "thumbnail": "https://thumbnailer.mixcloud.com/25x25/a.jpg",
                    "medium": "https://thumbnailer.mixcloud.com/100x100/a.jpg",
                    "large": "https://thumbnailer.mixcloud.com/300x300/a.jpg"
                }
            },
            {
                "slug": "no-key-show",
                "name": "No Key Show",
                "audio_length": 59,
                "user": {"username": "anon"},
                "pictures": {"thumbnail": "https://thumbnailer.mixcloud.com/25x25/b.jpg"}
            }
        ],
        "paging": {}
    })
}

pub fn internet_archive_search() -> Value {
    json!({
        "responseHeader": {"status": 0},
        "response": {
            "numFound": 3,
            "docs": [
                {
                    "identifier": "gd1977-05-08",
                    "title": "Grateful Dead Live at Barton Hall",
                    "creator": ["Grateful Dead", "Jerry Garcia"],
                    "date": "1977-05-08T00:00:00Z"
                },
                {
                    "title": "Orphaned document without identifier"
                },
                {
                    "identifier": "78_blues",
                    "description": ["A 78rpm transfer"],
                    "creator": "Bessie Smith"
                }
            ]
        }
    })
}

pub fn youtube_search() -> Value {
    json!({
        "kind": "youtube#searchListResponse",
        "items": [
            {
                "id": {"kind": "youtube#video", "videoId": "fJ9rUzIMcZQ"},
                "snippet": {
                    "title": "Queen – Bohemian Rhapsody (Official Video)",
                    "channelTitle": "Queen Official",
                    "description": "Taken from A Night At The Opera",
                    "publishedAt": "2008-08-01T11:06:40Z",
                    "thumbnails": {
                        "default": {"url": "https://i.ytimg.com/vi/fJ9rUzIMcZQ/default.jpg"},
                        "medium": {"url": "https://i.ytimg.com/vi/fJ9rUzIMcZQ/mqdefault.jpg"},
                        "high": {"url": "https://i.ytimg.com/vi/fJ9rUzIMcZQ/hqdefault.jpg"}
                    }
                }
            }
        ]
    })
}
