#[cfg(test)]
mod tests {
    use crate::audio::catalog::{asset_file_name, find_sound, SoundSource, SOUND_OPTIONS};
    use crate::audio::fake_backend::{Call, FakeBackend};
    use crate::audio::session::{volume_to_gain, AudioError, AudioSession};

    fn session_with_fake() -> (AudioSession, FakeBackend) {
        let backend = FakeBackend::new();
        (AudioSession::new(Box::new(backend.clone())), backend)
    }

    #[test]
    fn test_catalog_has_four_unique_sounds() {
        assert_eq!(SOUND_OPTIONS.len(), 4);
        let labels: Vec<_> = SOUND_OPTIONS.iter().map(|option| option.label).collect();
        assert_eq!(labels, ["Chimes", "Rain", "Meditation", "Tibetan Bowl"]);

        for option in SOUND_OPTIONS.iter() {
            assert_eq!(find_sound(option.value), Some(option));
            assert!(option.source.is_valid());
            assert!(asset_file_name(option.source.asset.unwrap()).is_some());
        }
        assert!(find_sound("bell").is_none());
    }

    #[test]
    fn test_volume_maps_linearly_to_gain() {
        assert_eq!(volume_to_gain(0), 0.0);
        assert_eq!(volume_to_gain(50), 0.5);
        assert_eq!(volume_to_gain(100), 1.0);
        assert_eq!(volume_to_gain(250), 1.0);
    }

    #[test]
    fn test_play_loads_sets_gain_and_plays() {
        let (mut session, backend) = session_with_fake();
        let source = SoundSource::asset(1);

        session.play(Some(&source), 40).expect("play should succeed");

        assert!(session.is_loaded());
        let log = backend.log.borrow();
        assert_eq!(log.calls, vec![Call::Load(source), Call::SetVolume(0, 0.4), Call::Play(0)]);
        assert_eq!(log.live_handles, vec![0]);
    }

    #[test]
    fn test_second_play_releases_first_sound() {
        let (mut session, backend) = session_with_fake();
        let first = SoundSource::asset(1);
        let second = SoundSource::asset(2);

        session.play(Some(&first), 50).unwrap();
        session.play(Some(&second), 50).unwrap();

        let log = backend.log.borrow();
        assert_eq!(log.live_handles, vec![1]);

        let unload_first = log.calls.iter().position(|call| *call == Call::Unload(0)).unwrap();
        let load_second = log.calls.iter().position(|call| *call == Call::Load(second.clone())).unwrap();
        assert!(unload_first < load_second, "first sound must be released before the second loads");
    }

    #[test]
    fn test_stop_without_sound_is_noop() {
        let (mut session, backend) = session_with_fake();
        session.stop();
        assert!(!session.is_loaded());
        assert!(backend.log.borrow().calls.is_empty());
    }

    #[test]
    fn test_stop_releases_loaded_sound() {
        let (mut session, backend) = session_with_fake();
        session.play(Some(&SoundSource::asset(3)), 80).unwrap();

        session.stop();

        assert!(!session.is_loaded());
        let log = backend.log.borrow();
        assert!(log.live_handles.is_empty());
        assert_eq!(&log.calls[3..], &[Call::Stop(0), Call::Unload(0)]);
    }

    #[test]
    fn test_invalid_sources_never_reach_backend() {
        let (mut session, backend) = session_with_fake();
        session.play(Some(&SoundSource::asset(1)), 50).unwrap();
        let calls_before = backend.log.borrow().calls.len();

        let malformed = SoundSource { asset: None, uri: None };
        let blank_uri = SoundSource::uri("  ");

        assert!(matches!(session.play(None, 50), Err(AudioError::InvalidSource)));
        assert!(matches!(session.play(Some(&malformed), 50), Err(AudioError::InvalidSource)));
        assert!(matches!(session.play(Some(&blank_uri), 50), Err(AudioError::InvalidSource)));

        // The already-loaded sound is untouched.
        assert!(session.is_loaded());
        assert_eq!(backend.log.borrow().calls.len(), calls_before);
    }

    #[test]
    fn test_load_failure_leaves_nothing_loaded() {
        let (mut session, backend) = session_with_fake();
        session.play(Some(&SoundSource::asset(1)), 50).unwrap();
        backend.log.borrow_mut().fail_load = true;

        let result = session.play(Some(&SoundSource::uri("file:///missing.wav")), 50);

        assert!(matches!(result, Err(AudioError::Load(_))));
        assert!(!session.is_loaded());
        assert!(backend.log.borrow().live_handles.is_empty());
    }

    #[test]
    fn test_playback_failure_releases_handle() {
        let (mut session, backend) = session_with_fake();
        backend.log.borrow_mut().fail_play = true;

        let result = session.play(Some(&SoundSource::asset(2)), 50);

        assert!(matches!(result, Err(AudioError::Playback(_))));
        assert!(!session.is_loaded());
        let log = backend.log.borrow();
        assert!(log.live_handles.is_empty());
        assert_eq!(log.calls.last(), Some(&Call::Unload(0)));
    }

    #[test]
    fn test_stop_failure_still_clears_session() {
        let (mut session, backend) = session_with_fake();
        session.play(Some(&SoundSource::asset(4)), 50).unwrap();
        backend.log.borrow_mut().fail_stop = true;

        session.stop();

        assert!(!session.is_loaded());
        assert!(backend.log.borrow().live_handles.is_empty());
    }

    #[test]
    fn test_dropping_session_releases_sound() {
        let (mut session, backend) = session_with_fake();
        session.play(Some(&SoundSource::asset(1)), 50).unwrap();

        drop(session);

        assert!(backend.log.borrow().live_handles.is_empty());
    }
}
