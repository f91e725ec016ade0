use gen_api::{Frame, FrameStreamParser};

#[test]
fn framing_parses_deltas_and_done() {
    let payload = concat!(
        "data: {\"content\":\"hel\"}\n",
        "data: {\"content\":\"lo\"}\n",
        "data: {\"done\":true}\n"
    );

    let frames = FrameStreamParser::parse_frames(payload);
    assert_eq!(
        frames,
        vec![
            Frame::ContentDelta("hel".to_string()),
            Frame::ContentDelta("lo".to_string()),
            Frame::Done,
        ]
    );
}

#[test]
fn malformed_payload_between_valid_frames_does_not_corrupt_accumulation() {
    let payload = concat!(
        "data: {\"content\":\"fu\"}\n",
        "data: not-json\n",
        "data: {\"content\":\"nc\"}\n",
        "data: {\"done\":true}\n"
    );

    let mut accumulated = String::new();
    for frame in FrameStreamParser::parse_frames(payload) {
        if let Frame::ContentDelta(delta) = frame {
            accumulated.push_str(&delta);
        }
    }

    assert_eq!(accumulated, "func");
}

#[test]
fn lines_without_data_prefix_are_ignored() {
    let payload = concat!(
        ": keep-alive\n",
        "event: message\n",
        "\n",
        "data: {\"content\":\"x\"}\n"
    );

    let frames = FrameStreamParser::parse_frames(payload);
    assert_eq!(frames, vec![Frame::ContentDelta("x".to_string())]);
}

#[test]
fn payload_line_split_across_three_chunks_reassembles() {
    let mut parser = FrameStreamParser::default();

    assert!(parser.feed(b"data: {\"con").is_empty());
    assert!(parser.feed(b"tent\":\"abc\"").is_empty());
    let frames = parser.feed(b"}\n");

    assert_eq!(frames, vec![Frame::ContentDelta("abc".to_string())]);
    assert!(parser.is_empty_buffer());
}

#[test]
fn multibyte_delta_split_at_every_boundary_is_never_corrupted() {
    let line = "data: {\"content\":\"\u{65e5}\u{672c}\u{8a9e}\"}\n".as_bytes().to_vec();

    for split in 1..line.len() {
        let mut parser = FrameStreamParser::default();
        let mut frames = parser.feed(&line[..split]);
        frames.extend(parser.feed(&line[split..]));

        assert_eq!(
            frames,
            vec![Frame::ContentDelta("\u{65e5}\u{672c}\u{8a9e}".to_string())],
            "split at byte {split} corrupted the delta"
        );
    }
}

#[test]
fn crlf_terminated_lines_parse() {
    let frames = FrameStreamParser::parse_frames("data: {\"done\":true}\r\n");
    assert_eq!(frames, vec![Frame::Done]);
}

#[test]
fn empty_data_lines_are_skipped() {
    let payload = concat!("data: \n", "data: {\"content\":\"done?\"}\n");
    let frames = FrameStreamParser::parse_frames(payload);
    assert_eq!(frames, vec![Frame::ContentDelta("done?".to_string())]);
}
