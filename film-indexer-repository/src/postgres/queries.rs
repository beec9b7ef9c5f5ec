//! SQL used to extract changed film works.

/// Film works whose own row, genres or persons changed after `$1`.
///
/// Children are aggregated over every link of the film work, and the
/// change filter is applied to the aggregate, so a single updated person
/// still yields the film work with its full cast. `modified_at` is the
/// latest `updated_at` among the film work and its children; rows come out
/// in ascending `modified_at` order with the id as tie-breaker.
pub const CHANGED_FILM_WORKS: &str = r#"
SELECT fw.id,
       fw.title,
       fw.rating,
       fw.description,
       GREATEST(fw.updated_at, MAX(g.updated_at), MAX(p.updated_at)) AS modified_at,
       COALESCE(
           ARRAY_AGG(DISTINCT g.name) FILTER (WHERE g.id IS NOT NULL),
           '{}'
       ) AS genres,
       COALESCE(
           JSONB_AGG(DISTINCT JSONB_BUILD_OBJECT('role', pfw.role, 'id', p.id, 'name', p.full_name))
               FILTER (WHERE p.id IS NOT NULL),
           '[]'
       ) AS persons
FROM content.film_work fw
LEFT JOIN content.person_film_work pfw ON pfw.film_work_id = fw.id
LEFT JOIN content.person p ON p.id = pfw.person_id
LEFT JOIN content.genre_film_work gfw ON gfw.film_work_id = fw.id
LEFT JOIN content.genre g ON g.id = gfw.genre_id
GROUP BY fw.id
HAVING GREATEST(fw.updated_at, MAX(g.updated_at), MAX(p.updated_at)) > $1
ORDER BY modified_at ASC, fw.id ASC
"#;

/// Cheap round trip used as a connectivity check.
pub const PING: &str = "SELECT 1";
