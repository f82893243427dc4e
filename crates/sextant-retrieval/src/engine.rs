//! RetrievalEngine: per-graph artifacts, signal computation, fusion, caching.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sextant_core::config::{GraphConfig, SextantConfig};
use sextant_core::models::{AuthorityOutcome, DegradationEvent};
use sextant_core::signals::{top_k, SignalMap};
use sextant_core::traits::IGraphAccessor;
use sextant_core::{
    EdgeTypeWeights, Intent, IntentEdgeMap, IntentProfile, IntentProfiles, SearchMode,
    SearchResponse, SextantError, SextantResult,
};
use sextant_embeddings::{EmbeddingMatrix, QueryEmbedder};
use sextant_graph::{
    score_intent_edges, AuthorityScores, CommunityAssignment, GraphSnapshot, ProximityBooster,
};
use sextant_lexical::{combine_text_signal, Analyzer, KeywordAmplifier, LexicalIndex};
use tracing::{debug, info, info_span, warn};

use crate::cache::{GenerationClock, GraphCacheRegistry, QueryCache, QueryKey};
use crate::diversity::diversify;
use crate::fusion::{fuse, SignalSet};
use crate::intent::IntentClassifier;

/// Everything derived from one snapshot of a graph. Authority and
/// communities are computed on first use.
pub struct GraphArtifacts {
    snapshot: GraphSnapshot,
    lexical: LexicalIndex,
    embeddings: EmbeddingMatrix,
    authority: OnceLock<AuthorityScores>,
    communities: OnceLock<Option<CommunityAssignment>>,
}

impl GraphArtifacts {
    pub fn load(
        accessor: &dyn IGraphAccessor,
        graph_id: &str,
        analyzer: &Analyzer,
        config: &SextantConfig,
    ) -> SextantResult<Self> {
        let snapshot = GraphSnapshot::load(accessor, graph_id)?;
        let (lexical, embeddings) = rayon::join(
            || LexicalIndex::build(snapshot.nodes(), analyzer, &config.lexical),
            || EmbeddingMatrix::from_accessor(accessor, graph_id, snapshot.nodes()),
        );
        let embeddings = embeddings?;
        info!(
            graph_id,
            nodes = snapshot.node_count(),
            edges = snapshot.edge_count(),
            dropped_edges = snapshot.dropped_edges(),
            terms = lexical.term_count(),
            vectors = embeddings.len(),
            "graph artifacts built"
        );
        Ok(Self {
            snapshot,
            lexical,
            embeddings,
            authority: OnceLock::new(),
            communities: OnceLock::new(),
        })
    }

    pub fn snapshot(&self) -> &GraphSnapshot {
        &self.snapshot
    }

    pub fn lexical(&self) -> &LexicalIndex {
        &self.lexical
    }

    pub fn embeddings(&self) -> &EmbeddingMatrix {
        &self.embeddings
    }

    pub fn authority(&self, config: &GraphConfig) -> &AuthorityScores {
        self.authority
            .get_or_init(|| AuthorityScores::compute(&self.snapshot, config))
    }

    pub fn communities(&self, config: &GraphConfig) -> Option<&CommunityAssignment> {
        self.communities
            .get_or_init(|| CommunityAssignment::detect(&self.snapshot, config))
            .as_ref()
    }
}

/// Point-in-time engine counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub queries: u64,
    pub cache_hits: u64,
    pub computations: u64,
    pub invalidations: u64,
}

#[derive(Default)]
struct Counters {
    queries: AtomicU64,
    cache_hits: AtomicU64,
    computations: AtomicU64,
    invalidations: AtomicU64,
}

/// The main search entry point. Safe to share across threads.
pub struct RetrievalEngine {
    accessor: Arc<dyn IGraphAccessor>,
    config: SextantConfig,
    profiles: IntentProfiles,
    edge_map: IntentEdgeMap,
    edge_weights: EdgeTypeWeights,
    classifier: IntentClassifier,
    analyzer: Analyzer,
    amplifier: KeywordAmplifier,
    embedder: Option<QueryEmbedder>,
    artifacts: GraphCacheRegistry<GraphArtifacts>,
    query_cache: QueryCache,
    generations: GenerationClock,
    counters: Counters,
}

impl RetrievalEngine {
    /// Engine with the embedding cascade built from `config.embedding`.
    pub fn new(accessor: Arc<dyn IGraphAccessor>, config: SextantConfig) -> SextantResult<Self> {
        config.validate()?;
        let embedder = QueryEmbedder::from_config(&config.embedding)?;
        Self::with_embedder(accessor, config, Some(embedder))
    }

    /// Engine with a caller-supplied embedder, or none (embedding signal only
    /// from vectors passed to [`Self::search_with_vector`]).
    pub fn with_embedder(
        accessor: Arc<dyn IGraphAccessor>,
        config: SextantConfig,
        embedder: Option<QueryEmbedder>,
    ) -> SextantResult<Self> {
        config.validate()?;
        let analyzer = Analyzer::new(&config.lexical);
        let amplifier = KeywordAmplifier::new(&analyzer, config.lexical.amplification_factor);
        Ok(Self {
            profiles: config.intent_profiles()?,
            edge_map: config.intent_edge_map()?,
            edge_weights: config.edge_type_weights()?,
            classifier: IntentClassifier::new(&config.retrieval),
            query_cache: QueryCache::new(&config.cache),
            analyzer,
            amplifier,
            embedder,
            accessor,
            config,
            artifacts: GraphCacheRegistry::new(),
            generations: GenerationClock::new(),
            counters: Counters::default(),
        })
    }

    pub fn search(
        &self,
        graph_id: &str,
        query_text: &str,
        mode: SearchMode,
        intent_override: Option<Intent>,
    ) -> SextantResult<Arc<SearchResponse>> {
        self.search_with_vector(graph_id, query_text, mode, intent_override, None)
    }

    /// Search with a caller-sourced query vector. `None` falls back to the
    /// engine's embedder.
    pub fn search_with_vector(
        &self,
        graph_id: &str,
        query_text: &str,
        mode: SearchMode,
        intent_override: Option<Intent>,
        query_vector: Option<&[f32]>,
    ) -> SextantResult<Arc<SearchResponse>> {
        let query = query_text.trim();
        if query.is_empty() {
            return Err(SextantError::EmptyQuery);
        }
        self.counters.queries.fetch_add(1, Ordering::Relaxed);

        let intent = self.classifier.resolve(query, intent_override);
        let weights = self.weights_for(mode, intent);
        let key = QueryKey::new(graph_id, query, mode, intent, query_vector);
        if let Some(hit) = self.query_cache.get(&key) {
            self.counters.cache_hits.fetch_add(1, Ordering::Relaxed);
            debug!(graph_id, %intent, %mode, "query cache hit");
            return Ok(hit);
        }

        let _span = info_span!("sextant.search", graph_id, %intent, %mode).entered();
        let generation = self.generations.current(graph_id);
        let artifacts = self.artifacts.get_or_try_build(graph_id, || {
            GraphArtifacts::load(self.accessor.as_ref(), graph_id, &self.analyzer, &self.config)
        })?;
        let response = Arc::new(self.compute(
            &artifacts,
            graph_id,
            query,
            mode,
            intent,
            weights,
            query_vector,
        ));
        let published = self.generations.publish_if_current(graph_id, generation, || {
            self.query_cache.insert(key, Arc::clone(&response));
        });
        if !published {
            debug!(graph_id, "graph invalidated during search, result not cached");
        }
        self.counters.computations.fetch_add(1, Ordering::Relaxed);

        info!(
            results = response.results.len(),
            authority = ?response.authority,
            communities = ?response.communities,
            "search complete"
        );
        Ok(response)
    }

    /// Drop cached artifacts and query results for one graph, or for all
    /// graphs when `graph_id` is `None`.
    pub fn invalidate(&self, graph_id: Option<&str>) {
        match graph_id {
            Some(graph_id) => {
                self.generations.advance(graph_id, || {
                    self.artifacts.invalidate(graph_id);
                    self.query_cache.invalidate_graph(graph_id);
                });
                info!(graph_id, "graph caches invalidated");
            }
            None => {
                self.generations.advance_all(|| {
                    self.artifacts.clear();
                    self.query_cache.invalidate_all();
                });
                info!("all graph caches invalidated");
            }
        }
        self.counters.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            queries: self.counters.queries.load(Ordering::Relaxed),
            cache_hits: self.counters.cache_hits.load(Ordering::Relaxed),
            computations: self.counters.computations.load(Ordering::Relaxed),
            invalidations: self.counters.invalidations.load(Ordering::Relaxed),
        }
    }

    /// Embedding fallbacks recorded since the last drain.
    pub fn drain_degradation_events(&self) -> Vec<DegradationEvent> {
        self.embedder
            .as_ref()
            .map(QueryEmbedder::drain_events)
            .unwrap_or_default()
    }

    /// Number of cached query results.
    pub fn cached_queries(&self) -> u64 {
        self.query_cache.entry_count()
    }

    pub fn config(&self) -> &SextantConfig {
        &self.config
    }

    fn weights_for(&self, mode: SearchMode, intent: Intent) -> IntentProfile {
        match mode {
            SearchMode::Hybrid => self.profiles.get(intent),
            SearchMode::Lexical => IntentProfile::LEXICAL_ONLY,
            SearchMode::Embedding => IntentProfile::EMBEDDING_ONLY,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn compute(
        &self,
        artifacts: &GraphArtifacts,
        graph_id: &str,
        query: &str,
        mode: SearchMode,
        intent: Intent,
        weights: IntentProfile,
        query_vector: Option<&[f32]>,
    ) -> SearchResponse {
        let snapshot = artifacts.snapshot();
        let (text, embedding) = rayon::join(
            || match mode {
                SearchMode::Embedding => SignalMap::new(),
                _ => self.text_signal(artifacts, graph_id, query, intent),
            },
            || match mode {
                SearchMode::Lexical => SignalMap::new(),
                _ => self.embedding_signal(artifacts, query, query_vector),
            },
        );
        debug!(text = text.len(), embedding = embedding.len(), "base signals computed");

        let hybrid = mode == SearchMode::Hybrid;
        let mut authority_outcome = AuthorityOutcome::NotComputed;
        let (graph, intent_signal) = if hybrid && weights.uses_graph_signals() {
            let seeds = self.seeds(&text, &embedding);
            let authority = artifacts.authority(&self.config.graph);
            authority_outcome = authority.outcome();
            let extra: Vec<&str> = text
                .keys()
                .chain(embedding.keys())
                .map(String::as_str)
                .collect();
            let edge_types = self.edge_map.edge_types(intent);
            rayon::join(
                || {
                    ProximityBooster::new(snapshot, &self.edge_weights, &self.config.graph)
                        .boost(&seeds, intent, authority, &extra)
                },
                || score_intent_edges(snapshot, &seeds, edge_types, &self.config.graph),
            )
        } else {
            (SignalMap::new(), SignalMap::new())
        };

        let signals = SignalSet {
            embedding,
            text,
            graph,
            intent: intent_signal,
        };
        let mut results = fuse(&signals, &weights, |id| {
            snapshot.node(id).map(|n| n.name.as_str())
        });

        let partition = if hybrid {
            artifacts.communities(&self.config.graph)
        } else {
            None
        };
        let retrieval = &self.config.retrieval;
        diversify(
            &mut results,
            partition,
            retrieval.diversity_boost,
            retrieval.diversity_min_results,
        );
        if let Some(max) = retrieval.max_results {
            results.truncate(max);
        }

        SearchResponse {
            graph_id: graph_id.to_string(),
            query: query.to_string(),
            mode,
            intent,
            weights,
            results,
            authority: authority_outcome,
            communities: partition.map(CommunityAssignment::count),
            cached_at: Utc::now(),
        }
    }

    /// BM25 over the amplified query, merged with the accessor's full-text
    /// results when it has any.
    fn text_signal(
        &self,
        artifacts: &GraphArtifacts,
        graph_id: &str,
        query: &str,
        intent: Intent,
    ) -> SignalMap {
        let tokens = self.analyzer.analyze(query);
        let amplified = self.amplifier.amplify(&tokens, intent);
        let bm25 = artifacts.lexical().score(&amplified);

        let full_text = match self.accessor.full_text_search(
            graph_id,
            query,
            self.config.retrieval.full_text_limit,
        ) {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, graph_id, "full-text search failed, using BM25 only");
                None
            }
        };
        combine_text_signal(bm25, full_text.as_deref())
    }

    fn embedding_signal(
        &self,
        artifacts: &GraphArtifacts,
        query: &str,
        query_vector: Option<&[f32]>,
    ) -> SignalMap {
        let matrix = artifacts.embeddings();
        if matrix.is_empty() {
            return SignalMap::new();
        }
        if let Some(vector) = query_vector {
            return matrix.similarities(vector);
        }
        self.embedder
            .as_ref()
            .and_then(|embedder| embedder.embed(query, matrix.dimensions()))
            .map(|vector| matrix.similarities(&vector))
            .unwrap_or_default()
    }

    /// Top lexical and embedding hits, deduplicated, lexical first.
    fn seeds(&self, text: &SignalMap, embedding: &SignalMap) -> Vec<String> {
        let k = self.config.retrieval.seed_top_k;
        let mut seen = HashSet::new();
        top_k(text, k)
            .into_iter()
            .chain(top_k(embedding, k))
            .filter(|id| seen.insert(id.clone()))
            .collect()
    }
}
